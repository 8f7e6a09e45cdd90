use eventseq_core::commands::SeqFeedback;
use eventseq_core::engine::SequenceEngine;
use eventseq_core::handle::{HandleError, SequencerHandle};
use eventseq_types::{Bank, SequenceError, SequencerAction, StepIndex, StepParam};

fn spawn(length: u16) -> SequencerHandle {
    SequencerHandle::spawn(SequenceEngine::new(length).unwrap())
}

#[test]
fn edits_between_ticks_land_on_the_step_between_them() {
    for _ in 0..50 {
        let handle = spawn(8);
        for t in 0..8u16 {
            handle.tick().unwrap();
            handle.send(SequencerAction::SetParam(StepParam::Sync, (t + 1) * 100));
            if t % 2 == 0 {
                handle.send(SequencerAction::AddNote(36 + t as u8));
            }
        }

        let snap = handle.snapshot().unwrap();
        assert_eq!(
            snap.lane(StepParam::Sync),
            vec![100, 200, 300, 400, 500, 600, 700, 800]
        );
        let notes: Vec<&[u8]> = snap.steps.iter().map(|s| s.notes(Bank::A)).collect();
        let expected: [&[u8]; 8] = [&[36], &[], &[38], &[], &[40], &[], &[42], &[]];
        assert_eq!(notes, expected);
        assert!(handle.drain_feedback().iter().all(|fb| !matches!(fb, SeqFeedback::Error(_))));
    }
}

#[test]
fn edit_sent_before_tick_is_not_overtaken() {
    let handle = spawn(4);
    handle.tick().unwrap();
    handle.send(SequencerAction::SetParam(StepParam::Decay1, 11));
    handle.tick().unwrap();
    handle.send(SequencerAction::SetParam(StepParam::Decay1, 22));
    handle.tick().unwrap();

    let snap = handle.snapshot().unwrap();
    assert_eq!(snap.cursor, Some(StepIndex::new(3)));
    assert_eq!(snap.lane(StepParam::Decay1), vec![11, 22, 0]);
}

#[test]
fn ticks_are_applied_before_later_edits() {
    let handle = spawn(4);
    for _ in 0..3 {
        handle.tick().unwrap();
    }
    handle
        .apply(SequencerAction::SetParam(StepParam::Sync, 333))
        .unwrap();

    let snap = handle.snapshot().unwrap();
    assert_eq!(snap.cursor, Some(StepIndex::new(3)));
    assert_eq!(snap.lane(StepParam::Sync), vec![0, 0, 333]);
}

#[test]
fn query_before_start_reports_error() {
    let handle = spawn(4);
    assert_eq!(
        handle.param(StepParam::Sync),
        Err(HandleError::Sequence(SequenceError::UseBeforeStart))
    );
}

#[test]
fn bank_isolation_through_handle() {
    let handle = spawn(2);
    handle.tick().unwrap();
    handle.apply(SequencerAction::SetParam(StepParam::Sync, 500)).unwrap();
    handle.apply(SequencerAction::ToggleBank).unwrap();
    handle.apply(SequencerAction::SetParam(StepParam::Sync, 999)).unwrap();
    handle.apply(SequencerAction::ToggleBank).unwrap();
    assert_eq!(handle.param(StepParam::Sync), Ok(500));
}

#[test]
fn feedback_reports_steps_and_async_errors() {
    let handle = spawn(2);
    handle.send(SequencerAction::AddNote(60)); // unstarted: error feedback
    handle.tick().unwrap();
    handle.tick().unwrap();
    handle.tick().unwrap();
    // Round-trip so everything above has been processed.
    handle.snapshot().unwrap();

    let feedback = handle.drain_feedback();
    assert_eq!(
        feedback,
        vec![
            SeqFeedback::Error(SequenceError::UseBeforeStart),
            SeqFeedback::StepChanged { index: StepIndex::new(1), bank: Bank::A },
            SeqFeedback::StepChanged { index: StepIndex::new(2), bank: Bank::A },
            SeqFeedback::StepChanged { index: StepIndex::new(1), bank: Bank::A },
        ]
    );
}

#[test]
fn notes_and_length_through_handle() {
    let handle = spawn(8);
    handle.tick().unwrap();
    handle.apply(SequencerAction::AddNote(36)).unwrap();
    assert_eq!(handle.notes(), Ok(vec![36]));

    assert_eq!(
        handle.apply(SequencerAction::SetLength(0)),
        Err(HandleError::Sequence(SequenceError::InvalidLength(0)))
    );
    let result = handle.apply(SequencerAction::Advance).unwrap();
    assert!(result.moved);
    assert_eq!(result.cursor, Some(StepIndex::new(2)));
    assert_eq!(
        handle.drain_feedback().last(),
        Some(&SeqFeedback::StepChanged { index: StepIndex::new(2), bank: Bank::A })
    );
}

#[test]
fn shutdown_disconnects() {
    let mut handle = spawn(2);
    handle.tick().unwrap();
    handle.shutdown();
    assert_eq!(handle.tick(), Err(HandleError::Disconnected));
    assert_eq!(handle.snapshot(), Err(HandleError::Disconnected));
}
