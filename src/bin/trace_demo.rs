//! Walk-through of the trace facility as a devops script would use it
//!
//! Trace settings come from `DEVOPS_TRACE_LEVEL` / `DEVOPS_TRACE_FILTER`.
//! The run ends with a failed admin check unless `DEVOPS_DEMO_ADMIN=true`.

use devops_fun::diagnostics::init_diagnostics;
use devops_fun::trace;
use devops_fun::{sanitize, TraceConfig};
use devops_fun::{trace_ast, trace_dbg, trace_emit, trace_err, trace_inf, trace_nrm, trace_wrn};

fn main() -> devops_fun::Result<()> {
    init_diagnostics(false);
    TraceConfig::from_env()?.apply();

    trace_ast!("Perfect DevOps");
    trace_err!("Failed to block user", 42, "Status:", 404);
    trace_wrn!("retry", 2, "of", 3);
    trace_nrm!();
    trace_inf!("Token belongs to user", "'root'", "admin:", true);
    trace_dbg!("Total pages:", 7, "Total items:", 1.5);
    trace_emit!(1, "raw", 'x');

    trace::ast(&["ast"]);
    trace::err(&["err"]);
    trace::wrn(&["wrn"]);
    trace::nrm(&["nrm"]);
    trace::inf(&["inf"]);
    trace::dbg(&["dbg"]);
    trace::list_items(true, true, &["a", "bb"]);
    trace_nrm!(sanitize("token=secret123", &["secret123"]));

    if std::env::var("DEVOPS_DEMO_ADMIN").as_deref() == Ok("true") {
        trace_inf!("admin verified");
        Ok(())
    } else {
        trace::fail_with_log("Token does not have admin privileges", None)
    }
}
