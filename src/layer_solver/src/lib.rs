#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! A layer by layer solver that is driven one algorithm at a time.
//!
//! The solver never turns the cube itself. It looks at the cube, publishes the
//! next corrective [`Algorithm`] through [`Solver::current_algorithm`] and
//! waits for [`Solver::on_algorithm_applied`] to be called once the caller has
//! played every step of it.

use std::{collections::VecDeque, fmt, mem};

use itertools::Itertools;
use log::{debug, error, info};
use rubik_core::{Algorithm, Color, Cube, CubeError, Face};
use thiserror::Error;

mod corners;
mod cross;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Invalid state to solve: {mode}")]
    InvalidState { mode: Mode },
    #[error("Could not find the piece colored {}", .colors.iter().join("-"))]
    PieceNotFound { colors: Vec<Color> },
    #[error("Internal consistency check failed: {0}")]
    AssertionFailure(String),
    #[error(transparent)]
    Cube(#[from] CubeError),
}

/// The colors of the top and bottom centers when solving started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poles {
    pub top: Color,
    pub bottom: Color,
}

/// The stages of the layer by layer method, in solving order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveState {
    FirstFaceCross,
    FirstFaceCorners,
    MiddleFace,
    LastFaceCross,
    LastFaceCrossAlign,
    LastFaceCorners,
    LastFaceCornerAlign,
}

type Handler = fn(Poles, &Cube, &mut Status<'_>) -> Result<Step, SolverError>;

impl SolveState {
    pub const ALL: [Self; 7] = [
        SolveState::FirstFaceCross,
        SolveState::FirstFaceCorners,
        SolveState::MiddleFace,
        SolveState::LastFaceCross,
        SolveState::LastFaceCrossAlign,
        SolveState::LastFaceCorners,
        SolveState::LastFaceCornerAlign,
    ];

    /// The stage entered once this one is complete
    pub const fn next(self) -> Option<SolveState> {
        match self {
            SolveState::FirstFaceCross => Some(SolveState::FirstFaceCorners),
            SolveState::FirstFaceCorners => Some(SolveState::MiddleFace),
            SolveState::MiddleFace => Some(SolveState::LastFaceCross),
            SolveState::LastFaceCross => Some(SolveState::LastFaceCrossAlign),
            SolveState::LastFaceCrossAlign => Some(SolveState::LastFaceCorners),
            SolveState::LastFaceCorners => Some(SolveState::LastFaceCornerAlign),
            SolveState::LastFaceCornerAlign => None,
        }
    }

    fn handler(self) -> Handler {
        match self {
            SolveState::FirstFaceCross => cross::first_face_cross,
            SolveState::FirstFaceCorners => corners::first_face_corners,
            SolveState::MiddleFace
            | SolveState::LastFaceCross
            | SolveState::LastFaceCrossAlign
            | SolveState::LastFaceCorners
            | SolveState::LastFaceCornerAlign => out_of_moves,
        }
    }
}

impl fmt::Display for SolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolveState::FirstFaceCross => "first face cross",
            SolveState::FirstFaceCorners => "first face corners",
            SolveState::MiddleFace => "middle face",
            SolveState::LastFaceCross => "last face cross",
            SolveState::LastFaceCrossAlign => "last face cross alignment",
            SolveState::LastFaceCorners => "last face corners",
            SolveState::LastFaceCornerAlign => "last face corner alignment",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Idle,
    /// A scramble has been handed out and no solve has started since
    Testing,
    Solving(SolveState),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => write!(f, "idle"),
            Mode::Testing => write!(f, "testing"),
            Mode::Solving(state) => write!(f, "solving the {state}"),
        }
    }
}

/// What a stage decided after looking at the cube
pub(crate) enum Step {
    /// Hand this algorithm to the caller and wait for it to be played
    Apply(Algorithm),
    /// The stage is complete, run the next one
    Advance,
    /// Solving cannot continue
    Halt,
}

/// The status channel handed to stage handlers
pub(crate) struct Status<'a> {
    messages: &'a mut VecDeque<String>,
}

impl Status<'_> {
    pub(crate) fn say(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.messages.push_back(message);
    }
}

fn out_of_moves(_: Poles, _: &Cube, status: &mut Status<'_>) -> Result<Step, SolverError> {
    status.say("That's all I can do now");
    Ok(Step::Halt)
}

/// The solver state machine
pub struct Solver {
    mode: Mode,
    poles: Option<Poles>,
    algorithm: Algorithm,
    messages: VecDeque<String>,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Solver {
            mode: Mode::Idle,
            poles: None,
            algorithm: Algorithm::new(),
            messages: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The top and bottom colors of the current or last solve
    pub fn poles(&self) -> Option<Poles> {
        self.poles
    }

    /// The algorithm the caller must play next. Empty when there is nothing to
    /// play.
    pub fn current_algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Get the status message queue of the solver
    pub fn messages(&mut self) -> &mut VecDeque<String> {
        &mut self.messages
    }

    /// Start solving from the first stage. Only accepted while idle or
    /// testing; otherwise nothing changes apart from a status message.
    pub fn solve(&mut self, cube: &Cube) -> Result<(), SolverError> {
        if let Mode::Solving(_) = self.mode {
            let err = SolverError::InvalidState { mode: self.mode };
            self.status().say(err.to_string());
            return Err(err);
        }

        let poles = Poles {
            top: cube.center_color(Face::Top),
            bottom: cube.center_color(Face::Bottom),
        };
        self.status().say(format!(
            "Top is {} and bottom is {}",
            poles.top, poles.bottom
        ));

        self.poles = Some(poles);
        self.algorithm.clear();
        self.mode = Mode::Solving(SolveState::FirstFaceCross);

        self.run(cube)
    }

    /// Tell the solver that every step of the current algorithm has been
    /// applied to `cube`. Does nothing unless a solve is in progress.
    pub fn on_algorithm_applied(&mut self, cube: &Cube) -> Result<(), SolverError> {
        let Mode::Solving(_) = self.mode else {
            return Ok(());
        };

        self.algorithm.clear();
        self.run(cube)
    }

    /// Hand out a random scramble as the current algorithm. Only accepted
    /// while idle.
    pub fn scramble(
        &mut self,
        length: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<&Algorithm, SolverError> {
        if self.mode != Mode::Idle {
            return Err(SolverError::InvalidState { mode: self.mode });
        }

        self.algorithm = Algorithm::random(length, rng);
        self.mode = Mode::Testing;
        let message = format!("Scrambling with {}", self.algorithm);
        self.status().say(message);

        Ok(&self.algorithm)
    }

    /// Stop whatever is going on and drop the algorithm in flight
    pub fn reset(&mut self) {
        debug!("Resetting from {}", self.mode);
        self.mode = Mode::Idle;
        self.algorithm.clear();
    }

    /// Play every algorithm the solver hands out against `cube`, reporting
    /// back after each one, until the solver stops solving. Returns the number
    /// of quarter steps played.
    pub fn step_until_idle(&mut self, cube: &mut Cube) -> Result<usize, SolverError> {
        let mut played = 0;

        loop {
            let algorithm = mem::take(&mut self.algorithm);

            if algorithm.is_empty() && matches!(self.mode, Mode::Solving(_)) {
                return Err(self.abort(SolverError::AssertionFailure(
                    "a stage handed out an empty algorithm".to_owned(),
                )));
            }

            if let Err(e) = cube.apply_algorithm(&algorithm) {
                return Err(self.abort(e.into()));
            }
            played += algorithm.len();

            if !matches!(self.mode, Mode::Solving(_)) {
                return Ok(played);
            }

            self.on_algorithm_applied(cube)?;
        }
    }

    fn status(&mut self) -> Status<'_> {
        Status {
            messages: &mut self.messages,
        }
    }

    /// Run stage handlers until one of them hands out an algorithm or solving
    /// ends
    fn run(&mut self, cube: &Cube) -> Result<(), SolverError> {
        while let Mode::Solving(state) = self.mode {
            let Some(poles) = self.poles else {
                return Err(self.abort(SolverError::AssertionFailure(
                    "solving without knowing the top color".to_owned(),
                )));
            };

            let result = (state.handler())(poles, cube, &mut self.status());
            let step = match result {
                Ok(step) => step,
                Err(e) => return Err(self.abort(e)),
            };

            match step {
                Step::Apply(algorithm) => {
                    debug!("{state}: handing out {algorithm}");
                    self.algorithm = algorithm;
                    return Ok(());
                }
                Step::Advance => {
                    self.mode = match state.next() {
                        Some(next) => {
                            debug!("Advancing from the {state} to the {next}");
                            Mode::Solving(next)
                        }
                        None => Mode::Idle,
                    };
                }
                Step::Halt => self.mode = Mode::Idle,
            }
        }

        Ok(())
    }

    fn abort(&mut self, err: SolverError) -> SolverError {
        error!("Aborting while {}: {err}", self.mode);
        self.status().say(format!("Aborted: {err}"));
        self.mode = Mode::Idle;
        self.algorithm.clear();
        err
    }
}
