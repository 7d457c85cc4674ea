//! Implementation of the `prebuild targets` command.
//!
//! Lists the targets a plain `prebuild build` would produce on this host.

use anyhow::Result;

use prebuild_lib::platform::os::Os;
use prebuild_lib::target::host_targets;

use crate::output::{OutputFormat, print_info, print_json, print_warning};

pub fn cmd_targets(output: OutputFormat) -> Result<()> {
  let host = Os::current();
  let targets = host_targets(host);
  let host_name = host.map_or("unknown", |os| os.as_str());

  if output.is_json() {
    return print_json(&serde_json::json!({ "host": host_name, "targets": targets }));
  }

  if targets.is_empty() {
    print_warning(&format!("No targets are configured for host {}", host_name));
    return Ok(());
  }

  for spec in targets {
    print_info(&spec.to_string());
  }
  Ok(())
}
