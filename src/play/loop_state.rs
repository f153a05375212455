/// Phase of the current turn. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopState {
    Init,
    SelectMeepleHuman,
    SelectMeepleAiSync,
    SelectMeepleAiAsyncStart,
    SelectMeepleAiAsyncWait,
    HighlightSelectedMeeple,
    SelectPositionHuman,
    SelectPositionAiSync,
    SelectPositionAiAsyncStart,
    SelectPositionAiAsyncWait,
    MoveMeepleToPosition,
    CheckEndCondition,
    DisplayEndScreen,
}

/// What a state handler asks the machine to do after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No transition yet; run the same handler next frame.
    Stay,
    /// Enter `LoopState` next frame, with the first-frame flag set even when
    /// it is the current state.
    Goto(LoopState),
    /// Leave the match loop with a menu decision.
    Finish(GameMenuDecision),
}

/// Result of one frame of the match loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMenuDecision {
    KeepPlaying,
    Replay,
    BackToMenu,
    ExitGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Index of the player who completed the winning line
    Winner(usize),
    Tie,
}
