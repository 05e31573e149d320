use std::{fmt, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::{
    geometry::{Axis, Direction, INNER, MIDDLE, OUTER, SIZE},
    rotation::Rotation,
};

/// An ordered list of quarter turns. It holds no reference to a cube, so it
/// can be played against any number of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Algorithm(Vec<Rotation>);

impl Algorithm {
    pub fn new() -> Self {
        Algorithm(Vec::new())
    }

    pub fn add_step(&mut self, rotation: Rotation) -> &mut Self {
        self.0.push(rotation);
        self
    }

    pub fn add_turn(&mut self, axis: Axis, direction: Direction, depth: usize) -> &mut Self {
        self.add_step(Rotation::new(axis, direction, depth))
    }

    /// Turn `count` neighbouring layers starting at `start`, one quarter step
    /// per layer in ascending depth order
    pub fn add_layers(
        &mut self,
        axis: Axis,
        direction: Direction,
        start: usize,
        count: usize,
    ) -> &mut Self {
        for depth in start..start + count {
            self.add_turn(axis, direction, depth);
        }
        self
    }

    /// Reorient the whole cube without changing which pieces are solved
    pub fn add_whole_cube(&mut self, axis: Axis, direction: Direction) -> &mut Self {
        self.add_layers(axis, direction, 0, SIZE)
    }

    /// Append another copy of the last step. Does nothing on an empty
    /// algorithm.
    pub fn repeat_last_step(&mut self) -> &mut Self {
        if let Some(&last) = self.0.last() {
            self.0.push(last);
        }
        self
    }

    pub fn extend_from(&mut self, other: &Algorithm) -> &mut Self {
        self.0.extend_from_slice(&other.0);
        self
    }

    /// The algorithm that undoes this one
    #[must_use]
    pub fn inverse(&self) -> Self {
        Algorithm(self.0.iter().rev().map(|step| step.inverse()).collect())
    }

    pub fn steps(&self) -> &[Rotation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rotation> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// A random sequence of single layer quarter turns in which no step
    /// immediately undoes the one before it
    pub fn random(length: usize, rng: &mut fastrand::Rng) -> Self {
        let mut steps: Vec<Rotation> = Vec::with_capacity(length);

        while steps.len() < length {
            let step = Rotation::new(
                Axis::ALL[rng.usize(..Axis::ALL.len())],
                Direction::ALL[rng.usize(..Direction::ALL.len())],
                rng.usize(..SIZE),
            );
            if steps.last().is_some_and(|&last| last == step.inverse()) {
                continue;
            }
            steps.push(step);
        }

        Algorithm(steps)
    }
}

impl From<Vec<Rotation>> for Algorithm {
    fn from(steps: Vec<Rotation>) -> Self {
        Algorithm(steps)
    }
}

impl FromIterator<Rotation> for Algorithm {
    fn from_iter<T: IntoIterator<Item = Rotation>>(iter: T) -> Self {
        Algorithm(iter.into_iter().collect())
    }
}

impl IntoIterator for Algorithm {
    type Item = Rotation;
    type IntoIter = std::vec::IntoIter<Rotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Algorithm {
    type Item = &'a Rotation;
    type IntoIter = std::slice::Iter<'a, Rotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAlgorithmError {
    #[error("Unknown move `{0}`")]
    UnknownMove(String),
}

/// Letters for single layer turns with the direction the plain letter turns
/// in. Priming the letter reverses it.
const LAYER_LETTERS: [(char, Axis, usize, Direction); 9] = [
    ('U', Axis::Y, OUTER, Direction::CounterClockwise),
    ('E', Axis::Y, MIDDLE, Direction::Clockwise),
    ('D', Axis::Y, INNER, Direction::Clockwise),
    ('R', Axis::X, OUTER, Direction::CounterClockwise),
    ('M', Axis::X, MIDDLE, Direction::Clockwise),
    ('L', Axis::X, INNER, Direction::Clockwise),
    ('F', Axis::Z, OUTER, Direction::CounterClockwise),
    ('S', Axis::Z, MIDDLE, Direction::CounterClockwise),
    ('B', Axis::Z, INNER, Direction::Clockwise),
];

/// Whole cube rotations turn the same way as R, U and F
const WHOLE_CUBE_LETTERS: [(char, Axis); 3] = [('x', Axis::X), ('y', Axis::Y), ('z', Axis::Z)];

const WHOLE_CUBE_DIRECTION: Direction = Direction::CounterClockwise;

/// One notation token before half turns are folded in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    letter: char,
    prime: bool,
}

impl Token {
    fn of_layer(rotation: Rotation) -> Option<Token> {
        LAYER_LETTERS
            .iter()
            .find(|&&(_, axis, depth, _)| axis == rotation.axis && depth == rotation.depth)
            .map(|&(letter, _, _, plain)| Token {
                letter,
                prime: rotation.direction != plain,
            })
    }

    fn of_whole_cube(axis: Axis, direction: Direction) -> Token {
        let letter = match axis {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        };

        Token {
            letter,
            prime: direction != WHOLE_CUBE_DIRECTION,
        }
    }

    fn word(self, half: bool) -> String {
        let suffix = match (half, self.prime) {
            (true, false) => "2",
            (true, true) => "2'",
            (false, true) => "'",
            (false, false) => "",
        };
        format!("{}{suffix}", self.letter)
    }

    /// The steps this token stands for, `None` if the letter is unknown
    fn steps(letter: char, prime: bool) -> Option<Vec<Rotation>> {
        let flip = |direction: Direction| {
            if prime {
                direction.reversed()
            } else {
                direction
            }
        };

        if let Some(&(_, axis, depth, plain)) = LAYER_LETTERS.iter().find(|(l, ..)| *l == letter) {
            return Some(vec![Rotation::new(axis, flip(plain), depth)]);
        }

        WHOLE_CUBE_LETTERS
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|&(_, axis)| {
                (0..SIZE)
                    .map(|depth| Rotation::new(axis, flip(WHOLE_CUBE_DIRECTION), depth))
                    .collect()
            })
    }
}

impl Algorithm {
    /// Notation tokens for the steps. A step on a layer that has no letter is
    /// passed through as is.
    fn tokens(&self) -> Vec<Result<Token, Rotation>> {
        let mut tokens = Vec::new();
        let mut rest = self.0.as_slice();

        while let Some(&first) = rest.first() {
            let whole = rest.len() >= SIZE
                && rest[..SIZE]
                    .iter()
                    .enumerate()
                    .all(|(depth, step)| {
                        step.axis == first.axis
                            && step.direction == first.direction
                            && step.depth == depth
                    });

            if whole {
                tokens.push(Ok(Token::of_whole_cube(first.axis, first.direction)));
                rest = &rest[SIZE..];
            } else {
                tokens.push(Token::of_layer(first).ok_or(first));
                rest = &rest[1..];
            }
        }

        tokens
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words = Vec::new();

        for (count, token) in self.tokens().into_iter().dedup_with_count() {
            match token {
                Ok(token) => {
                    for i in 0..count.div_ceil(2) {
                        words.push(token.word(2 * i + 1 < count));
                    }
                }
                Err(rotation) => {
                    words.extend(std::iter::repeat_n(format!("({rotation})"), count));
                }
            }
        }

        f.write_str(&words.join(" "))
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut algorithm = Algorithm::new();

        for word in s.split_whitespace() {
            let unknown = || ParseAlgorithmError::UnknownMove(word.to_owned());

            let mut chars = word.chars();
            let letter = chars.next().ok_or_else(unknown)?;
            let (prime, times) = match chars.as_str() {
                "" => (false, 1),
                "'" => (true, 1),
                "2" => (false, 2),
                "2'" => (true, 2),
                _ => return Err(unknown()),
            };

            let steps = Token::steps(letter, prime).ok_or_else(unknown)?;
            for _ in 0..times {
                algorithm.0.extend_from_slice(&steps);
            }
        }

        Ok(algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_expands_layers() {
        let mut algorithm = Algorithm::new();
        algorithm
            .add_whole_cube(Axis::Y, Direction::Clockwise)
            .add_turn(Axis::X, Direction::Clockwise, INNER)
            .repeat_last_step();

        assert_eq!(algorithm.len(), 5);
        assert_eq!(
            algorithm.steps()[..3]
                .iter()
                .map(|step| step.depth)
                .collect_vec(),
            vec![0, 1, 2]
        );
        assert_eq!(algorithm.steps()[3], algorithm.steps()[4]);
    }

    #[test]
    fn repeat_on_empty_is_a_no_op() {
        let mut algorithm = Algorithm::new();
        algorithm.repeat_last_step();
        assert!(algorithm.is_empty());
    }

    #[test]
    fn inverse_reverses_and_flips() {
        let algorithm: Algorithm = "R U' F".parse().unwrap();
        assert_eq!(algorithm.inverse().to_string(), "F' U R'");
    }

    #[test]
    fn notation() {
        let algorithm: Algorithm = "R U R' U'".parse().unwrap();
        assert_eq!(
            algorithm.steps()[0],
            Rotation::new(Axis::X, Direction::CounterClockwise, OUTER)
        );
        assert_eq!(
            algorithm.steps()[3],
            Rotation::new(Axis::Y, Direction::Clockwise, OUTER)
        );
        assert_eq!(algorithm.to_string(), "R U R' U'");

        let whole: Algorithm = "y' M2 x".parse().unwrap();
        assert_eq!(whole.len(), 3 + 2 + 3);
        assert_eq!(whole.to_string(), "y' M2 x");

        assert_eq!(
            "R Q".parse::<Algorithm>(),
            Err(ParseAlgorithmError::UnknownMove("Q".to_owned()))
        );
        assert_eq!(
            "R3".parse::<Algorithm>(),
            Err(ParseAlgorithmError::UnknownMove("R3".to_owned()))
        );
        assert_eq!(Algorithm::new().to_string(), "");
    }

    #[test]
    fn primed_half_turns_keep_their_direction() {
        for notation in ["R' R' U", "M' M' E' E'", "y' y' z'", "F2' S2' x2'"] {
            let algorithm: Algorithm = notation.parse().unwrap();
            let printed = algorithm.to_string();
            assert_eq!(printed.parse::<Algorithm>().unwrap(), algorithm, "{printed}");
        }

        let algorithm: Algorithm = "R' R' y' y'".parse().unwrap();
        assert_eq!(algorithm.to_string(), "R2' y2'");
        assert_eq!(
            "R2'".parse::<Algorithm>().unwrap().steps(),
            [Rotation::new(Axis::X, Direction::Clockwise, OUTER); 2]
        );
    }

    #[test]
    fn odd_runs_print_a_half_turn_then_a_quarter() {
        let mut algorithm = Algorithm::new();
        algorithm
            .add_turn(Axis::Z, Direction::Clockwise, INNER)
            .repeat_last_step()
            .repeat_last_step();
        assert_eq!(algorithm.to_string(), "B2 B");
    }

    #[test]
    fn random_never_undoes_itself() {
        let mut rng = fastrand::Rng::with_seed(7);
        let algorithm = Algorithm::random(200, &mut rng);

        assert_eq!(algorithm.len(), 200);
        for pair in algorithm.steps().windows(2) {
            assert_ne!(pair[1], pair[0].inverse());
        }

        let mut again = fastrand::Rng::with_seed(7);
        assert_eq!(Algorithm::random(200, &mut again), algorithm);
    }
}
