#![no_main]
use aspen::param::Unbalanced;
use aspen_fuzz_utils::{CommandSequence, RunnerState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|cmds: CommandSequence<u8, u16>| {
    let mut runner: RunnerState<u8, u16, Unbalanced> = RunnerState::init();

    for c in &cmds.cmds {
        runner.run_cmd(c);
    }
});
