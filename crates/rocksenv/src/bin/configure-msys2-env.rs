use std::process::ExitCode;

use rocksenv::TargetPlatform;

fn main() -> ExitCode {
    rocksenv::main_for(TargetPlatform::Msys2)
}
