//! Runs an agent's decisions on a worker thread so the frame loop never
//! blocks. The frame loop submits one request, polls every frame, and
//! retrieves the result exactly once.

use std::sync::mpsc::{self, TryRecvError};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use crate::error::CoordinatorError;
use crate::game::{BoardPos, GameState, Meeple};

use super::agent::Agent;

enum Request {
    SelectOpponentsMeeple(GameState),
    SelectMeeplePosition(GameState, Meeple),
}

/// A finished decision as produced by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Meeple(Meeple),
    Position(BoardPos),
}

impl Decision {
    fn kind(self) -> &'static str {
        match self {
            Decision::Meeple(_) => "meeple",
            Decision::Position(_) => "position",
        }
    }
}

/// Lifecycle of the single outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSlot {
    Idle,
    Pending,
    Ready(Decision),
    Consumed,
}

pub struct ThreadController {
    agent_name: String,
    requests: Option<mpsc::Sender<Request>>,
    results: mpsc::Receiver<Decision>,
    slot: ResultSlot,
    worker: Option<JoinHandle<()>>,
}

impl ThreadController {
    /// Move `agent` onto a dedicated worker thread.
    pub fn spawn(agent: Box<dyn Agent>) -> Result<Self, CoordinatorError> {
        let agent_name = agent.name().to_string();
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (result_tx, result_rx) = mpsc::channel::<Decision>();

        let worker = std::thread::Builder::new()
            .name(format!("tc-{}", agent_name.to_lowercase()))
            .spawn(move || {
                let mut agent = agent;
                for request in request_rx {
                    let decision = match request {
                        Request::SelectOpponentsMeeple(state) => {
                            Decision::Meeple(agent.select_opponents_meeple(&state))
                        }
                        Request::SelectMeeplePosition(state, meeple) => {
                            Decision::Position(agent.select_meeple_position(&state, meeple))
                        }
                    };
                    if result_tx.send(decision).is_err() {
                        break;
                    }
                }
            })
            .map_err(CoordinatorError::Spawn)?;

        Ok(ThreadController {
            agent_name,
            requests: Some(request_tx),
            results: result_rx,
            slot: ResultSlot::Idle,
            worker: Some(worker),
        })
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    pub fn slot(&self) -> ResultSlot {
        self.slot
    }

    /// Start choosing one of the opponent's meeples in the background.
    pub fn run_select_opponents_meeple(&mut self, state: GameState) -> Result<(), CoordinatorError> {
        self.submit(Request::SelectOpponentsMeeple(state))
    }

    /// Start choosing a board position for `meeple` in the background.
    pub fn run_select_meeple_position(
        &mut self,
        state: GameState,
        meeple: Meeple,
    ) -> Result<(), CoordinatorError> {
        self.submit(Request::SelectMeeplePosition(state, meeple))
    }

    fn submit(&mut self, request: Request) -> Result<(), CoordinatorError> {
        if matches!(self.slot, ResultSlot::Pending | ResultSlot::Ready(_)) {
            return Err(CoordinatorError::Busy);
        }
        let sender = self
            .requests
            .as_ref()
            .ok_or(CoordinatorError::WorkerDisconnected)?;
        sender
            .send(request)
            .map_err(|_| CoordinatorError::WorkerDisconnected)?;
        debug!(agent = %self.agent_name, "decision request submitted");
        self.slot = ResultSlot::Pending;
        Ok(())
    }

    /// Non-blocking check whether the submitted request has finished and
    /// its result has not been retrieved yet.
    pub fn is_result_available(&mut self) -> Result<bool, CoordinatorError> {
        match self.slot {
            ResultSlot::Pending => match self.results.try_recv() {
                Ok(decision) => {
                    self.slot = ResultSlot::Ready(decision);
                    Ok(true)
                }
                Err(TryRecvError::Empty) => Ok(false),
                Err(TryRecvError::Disconnected) => {
                    warn!(agent = %self.agent_name, "decision worker disconnected");
                    Err(CoordinatorError::WorkerDisconnected)
                }
            },
            ResultSlot::Ready(_) => Ok(true),
            ResultSlot::Idle | ResultSlot::Consumed => Ok(false),
        }
    }

    fn retrieve(&mut self) -> Result<Decision, CoordinatorError> {
        match self.slot {
            ResultSlot::Ready(decision) => {
                self.slot = ResultSlot::Consumed;
                Ok(decision)
            }
            ResultSlot::Idle => Err(CoordinatorError::NotSubmitted),
            ResultSlot::Pending => Err(CoordinatorError::NotReady),
            ResultSlot::Consumed => Err(CoordinatorError::AlreadyConsumed),
        }
    }

    /// Take the meeple chosen by the worker.
    pub fn opponents_meeple(&mut self) -> Result<Meeple, CoordinatorError> {
        match self.retrieve()? {
            Decision::Meeple(meeple) => Ok(meeple),
            other => Err(CoordinatorError::UnexpectedDecision {
                expected: "meeple",
                actual: other.kind(),
            }),
        }
    }

    /// Take the board position chosen by the worker.
    pub fn meeple_position(&mut self) -> Result<BoardPos, CoordinatorError> {
        match self.retrieve()? {
            Decision::Position(pos) => Ok(pos),
            other => Err(CoordinatorError::UnexpectedDecision {
                expected: "position",
                actual: other.kind(),
            }),
        }
    }
}

impl std::fmt::Debug for ThreadController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadController")
            .field("agent_name", &self.agent_name)
            .field("slot", &self.slot)
            .finish()
    }
}

impl Drop for ThreadController {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop once the current
        // decision (if any) is done.
        self.requests.take();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{Board, MeepleBag, MeepleColor};
    use std::time::{Duration, Instant};

    /// Agent that blocks every decision until the test opens the gate.
    pub(crate) struct GatedAgent {
        gate: mpsc::Receiver<()>,
        inner: RandomAgent,
    }

    impl GatedAgent {
        pub(crate) fn new() -> (Self, mpsc::Sender<()>) {
            let (tx, rx) = mpsc::channel();
            (
                GatedAgent {
                    gate: rx,
                    inner: RandomAgent::seeded(11),
                },
                tx,
            )
        }
    }

    impl Agent for GatedAgent {
        fn select_opponents_meeple(&mut self, state: &GameState) -> Meeple {
            let _ = self.gate.recv();
            self.inner.select_opponents_meeple(state)
        }

        fn select_meeple_position(&mut self, state: &GameState, meeple: Meeple) -> BoardPos {
            let _ = self.gate.recv();
            self.inner.select_meeple_position(state, meeple)
        }

        fn name(&self) -> &str {
            "Gated"
        }
    }

    fn initial_state() -> GameState {
        GameState::new(
            MeepleBag::new(MeepleColor::Black),
            MeepleBag::new(MeepleColor::White),
            Board::new(),
        )
    }

    fn wait_until_available(tc: &mut ThreadController) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !tc.is_result_available().unwrap() {
            assert!(Instant::now() < deadline, "worker did not answer in time");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_meeple_decision_roundtrip() {
        let mut tc = ThreadController::spawn(Box::new(RandomAgent::seeded(5))).unwrap();
        let state = initial_state();
        tc.run_select_opponents_meeple(state.clone()).unwrap();
        wait_until_available(&mut tc);
        let meeple = tc.opponents_meeple().unwrap();
        assert!(state.opponent_bag().contains_unused(meeple));
        assert_eq!(tc.slot(), ResultSlot::Consumed);
    }

    #[test]
    fn test_result_is_consumed_exactly_once() {
        let mut tc = ThreadController::spawn(Box::new(RandomAgent::seeded(5))).unwrap();
        let state = initial_state();
        let meeple = state.own_bag().unused()[0];
        tc.run_select_meeple_position(state, meeple).unwrap();
        wait_until_available(&mut tc);
        assert!(tc.meeple_position().is_ok());
        assert!(!tc.is_result_available().unwrap());
        assert!(matches!(
            tc.meeple_position(),
            Err(CoordinatorError::AlreadyConsumed)
        ));
    }

    #[test]
    fn test_retrieve_before_submit_fails() {
        let mut tc = ThreadController::spawn(Box::new(RandomAgent::seeded(5))).unwrap();
        assert!(!tc.is_result_available().unwrap());
        assert!(matches!(
            tc.opponents_meeple(),
            Err(CoordinatorError::NotSubmitted)
        ));
    }

    #[test]
    fn test_pending_request_blocks_resubmission_and_retrieval() {
        let (agent, gate) = GatedAgent::new();
        let mut tc = ThreadController::spawn(Box::new(agent)).unwrap();
        tc.run_select_opponents_meeple(initial_state()).unwrap();

        for _ in 0..10 {
            assert!(!tc.is_result_available().unwrap());
        }
        assert!(matches!(tc.opponents_meeple(), Err(CoordinatorError::NotReady)));
        assert!(matches!(
            tc.run_select_opponents_meeple(initial_state()),
            Err(CoordinatorError::Busy)
        ));

        gate.send(()).unwrap();
        wait_until_available(&mut tc);
        // unconsumed result still blocks a new request
        assert!(matches!(
            tc.run_select_opponents_meeple(initial_state()),
            Err(CoordinatorError::Busy)
        ));
        tc.opponents_meeple().unwrap();
        tc.run_select_opponents_meeple(initial_state()).unwrap();
        gate.send(()).unwrap();
        wait_until_available(&mut tc);
        tc.opponents_meeple().unwrap();
    }

    #[test]
    fn test_wrong_decision_kind_is_rejected() {
        let mut tc = ThreadController::spawn(Box::new(RandomAgent::seeded(5))).unwrap();
        tc.run_select_opponents_meeple(initial_state()).unwrap();
        wait_until_available(&mut tc);
        assert!(matches!(
            tc.meeple_position(),
            Err(CoordinatorError::UnexpectedDecision {
                expected: "position",
                actual: "meeple"
            })
        ));
    }
}
