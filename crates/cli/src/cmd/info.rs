//! Implementation of the `prebuild info` command.

use prebuild_lib::platform::os::Os;
use prebuild_lib::platform::{Host, cpu_count};
use prebuild_lib::target::host_targets;

use crate::output::print_stat;

pub fn cmd_info() {
  println!("System:");
  match Host::current() {
    Some(host) => print_stat("Platform", &host.triple()),
    None => print_stat("Platform", "could not detect platform"),
  }
  print_stat("CPUs", &cpu_count().to_string());
  print_stat("Default targets", &host_targets(Os::current()).len().to_string());
}
