#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use aspen::param::Avl;
use aspen_fuzz_utils::{CommandSequence, RunnerState};
use libfuzzer_sys::fuzz_target;

/// Keys from a small range, so that lookups and removals hit existing entries often
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct SmallKey(u8);

impl<'d> Arbitrary<'d> for SmallKey {
    fn arbitrary(u: &mut Unstructured<'d>) -> arbitrary::Result<Self> {
        Ok(SmallKey(u.int_in_range(0_u8..=63)?))
    }
}

fuzz_target!(|cmds: CommandSequence<SmallKey, char>| {
    let mut runner: RunnerState<SmallKey, char, Avl> = RunnerState::init();

    for c in &cmds.cmds {
        runner.run_cmd(c);
    }
});
