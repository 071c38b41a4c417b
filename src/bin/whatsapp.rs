//! Ansible binary module: `whatsapp <args-file>`.

use std::process::ExitCode;

use callmebot::module::{self, MODULE_NAME, ModuleArgs, ModuleResult};

fn main() -> ExitCode {
    if let Err(err) = callmebot::logging::init() {
        eprintln!("failed to initialise logging: {err}");
    }

    let result = match std::env::args_os().nth(1) {
        Some(path) => run(path),
        None => ModuleResult::fail(
            format!("{MODULE_NAME}: no argument file was provided"),
            None,
        ),
    };

    match result.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize module result");
            println!(r#"{{"changed": false, "failed": true, "msg": "failed to serialize module result"}}"#);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::from(result.exit_code())
}

fn run(path: std::ffi::OsString) -> ModuleResult {
    let span = tracing::info_span!("module", name = MODULE_NAME);
    let _entered = span.enter();

    let args = match ModuleArgs::from_file(&path) {
        Ok(args) => args,
        Err(err) => {
            tracing::warn!(error = %err, "rejecting module arguments");
            return ModuleResult::fail(err.to_string(), None);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => return ModuleResult::fail(format!("failed to start runtime: {err}"), None),
    };

    runtime.block_on(module::run_module(&args))
}
