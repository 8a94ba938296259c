use crate::blockchain::Difficulty;
use crate::state::RunState;

/// One mining unit: a trial at a difficulty index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkUnit {
    pub difficulty_index: usize,
    pub trial: u32,
}

impl WorkUnit {
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_index(self.difficulty_index)
    }

    /// State to persist once this unit is done.
    pub fn next_state(&self) -> RunState {
        RunState::after(self.difficulty_index, self.trial)
    }
}

/// Units left in the sweep `[0, max_difficulty) x [1, trials]` when resuming
/// at `start`. Only the first resumed difficulty starts at `start.trial`;
/// every later one starts at trial 1.
pub fn work_plan(
    start: RunState,
    max_difficulty: usize,
    trials: u32,
) -> impl Iterator<Item = WorkUnit> {
    (start.difficulty_index..max_difficulty).flat_map(move |difficulty_index| {
        let first_trial = if difficulty_index == start.difficulty_index {
            start.trial
        } else {
            1
        };
        (first_trial..=trials).map(move |trial| WorkUnit {
            difficulty_index,
            trial,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::{WorkUnit, work_plan};
    use crate::state::RunState;

    fn units(start: RunState, max: usize, trials: u32) -> Vec<(usize, u32)> {
        work_plan(start, max, trials)
            .map(|u| (u.difficulty_index, u.trial))
            .collect()
    }

    #[test]
    fn fresh_sweep_covers_every_pair_in_order() {
        assert_eq!(
            units(RunState::default(), 3, 2),
            vec![(0, 1), (0, 2), (1, 1), (1, 2), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn resume_only_skips_trials_of_the_first_difficulty() {
        assert_eq!(
            units(RunState::new(1, 3), 3, 3),
            vec![(1, 3), (2, 1), (2, 2), (2, 3)]
        );
    }

    #[test]
    fn resume_is_the_tail_of_a_full_sweep() {
        let full = units(RunState::default(), 4, 3);
        for (done, &(d, t)) in full.iter().enumerate() {
            assert_eq!(units(RunState::new(d, t), 4, 3), full[done..].to_vec());
        }
    }

    #[test]
    fn trial_past_the_end_moves_to_next_difficulty() {
        // state written after the last trial of difficulty 0
        assert_eq!(units(RunState::new(0, 3), 2, 2), vec![(1, 1), (1, 2)]);
    }

    #[test]
    fn start_beyond_sweep_has_no_work() {
        assert!(units(RunState::new(5, 1), 3, 1).is_empty());
        assert!(units(RunState::default(), 0, 1).is_empty());
    }

    #[test]
    fn unit_knows_its_difficulty_and_successor() {
        let unit = WorkUnit {
            difficulty_index: 2,
            trial: 4,
        };
        assert_eq!(unit.difficulty().as_str(), "000");
        assert_eq!(unit.next_state(), RunState::new(2, 5));
    }
}
