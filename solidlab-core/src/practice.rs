/// Generated practice questions and answer checking
use std::f64::consts::PI;

use crate::catalog;
use crate::properties::{cone_slant, tetrahedron_edge};
use crate::shape::{ShapeKind, Solid};
use crate::store::NewPracticeRecord;

/// Absolute difference below which an answer counts as correct
pub const ANSWER_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    SurfaceArea,
    Volume,
    /// Recover a dimension from a given measurement
    Reverse,
}

impl QuestionKind {
    pub const CYCLE: [QuestionKind; 3] = [
        QuestionKind::SurfaceArea,
        QuestionKind::Volume,
        QuestionKind::Reverse,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub kind: QuestionKind,
    pub shape: ShapeKind,
    pub prompt: String,
    pub answer: f64,
    /// Formula display string that solves the question
    pub formula: &'static str,
}

impl Question {
    pub fn is_correct(&self, user_answer: f64) -> bool {
        (user_answer - self.answer).abs() < ANSWER_TOLERANCE
    }
}

/// The `index`-th question for `shape`; questions cycle through the three kinds
pub fn question_for(shape: ShapeKind, index: usize) -> Question {
    let kind = QuestionKind::CYCLE[index % QuestionKind::CYCLE.len()];
    let config = catalog::config(shape);
    let name = config.name.to_lowercase();
    let formula = match kind {
        QuestionKind::Volume => config.formula.volume,
        QuestionKind::SurfaceArea | QuestionKind::Reverse => config.formula.surface_area,
    };

    let (prompt, answer) = match kind {
        QuestionKind::SurfaceArea => {
            let (solid, given) = area_example(shape);
            (
                format!("A {name} has {given}. What is its surface area?"),
                solid.properties().surface_area,
            )
        }
        QuestionKind::Volume => {
            let (solid, given) = volume_example(shape);
            (
                format!("A {name} has {given}. What is its volume?"),
                solid.properties().volume,
            )
        }
        QuestionKind::Reverse => reverse_example(shape, &name),
    };

    Question {
        kind,
        shape,
        prompt,
        answer,
        formula,
    }
}

fn area_example(shape: ShapeKind) -> (Solid, &'static str) {
    match shape {
        ShapeKind::Cube => (cube(2.0), "edge length 2"),
        ShapeKind::Sphere => (Solid::Sphere { radius: 2.0 }, "radius 2"),
        ShapeKind::Cylinder => (Solid::Cylinder { radius: 1.0, height: 2.0 }, "radius 1 and height 2"),
        ShapeKind::Cone => (Solid::Cone { radius: 3.0, height: 4.0 }, "radius 3 and height 4"),
        ShapeKind::Torus => (Solid::Torus { radius: 2.0, tube: 0.5 }, "major radius 2 and tube radius 0.5"),
        ShapeKind::Tetrahedron => (tetrahedron_with_edge(2.0), "edge length 2"),
    }
}

fn volume_example(shape: ShapeKind) -> (Solid, &'static str) {
    match shape {
        ShapeKind::Cube => (cube(3.0), "edge length 3"),
        ShapeKind::Sphere => (Solid::Sphere { radius: 3.0 }, "radius 3"),
        ShapeKind::Cylinder => (Solid::Cylinder { radius: 2.0, height: 3.0 }, "radius 2 and height 3"),
        ShapeKind::Cone => (Solid::Cone { radius: 3.0, height: 4.0 }, "radius 3 and height 4"),
        ShapeKind::Torus => (Solid::Torus { radius: 2.0, tube: 0.5 }, "major radius 2 and tube radius 0.5"),
        ShapeKind::Tetrahedron => (tetrahedron_with_edge(3.0), "edge length 3"),
    }
}

fn reverse_example(shape: ShapeKind, name: &str) -> (String, f64) {
    match shape {
        ShapeKind::Cube => (
            format!("A {name} has surface area 54. What is its edge length?"),
            3.0,
        ),
        ShapeKind::Sphere => {
            let area = Solid::Sphere { radius: 3.0 }.properties().surface_area;
            (
                format!("A {name} has surface area {area:.2}. What is its radius?"),
                3.0,
            )
        }
        ShapeKind::Cylinder => {
            let volume = PI * 2.0 * 2.0 * 3.0;
            (
                format!("A {name} with radius 2 has volume {volume:.2}. What is its height?"),
                3.0,
            )
        }
        ShapeKind::Cone => (
            format!("A {name} has radius 3 and height 4. What is its slant height?"),
            cone_slant(3.0, 4.0),
        ),
        ShapeKind::Torus => {
            let area = Solid::Torus { radius: 2.0, tube: 0.5 }.properties().surface_area;
            (
                format!("A {name} with major radius 2 has surface area {area:.2}. What is its tube radius?"),
                0.5,
            )
        }
        ShapeKind::Tetrahedron => (
            format!("A regular {name} has circumradius 3. What is its edge length?"),
            tetrahedron_edge(3.0),
        ),
    }
}

fn cube(edge: f64) -> Solid {
    Solid::Cube {
        width: edge,
        height: edge,
        depth: edge,
    }
}

fn tetrahedron_with_edge(edge: f64) -> Solid {
    Solid::Tetrahedron {
        radius: edge / tetrahedron_edge(1.0),
    }
}

/// Parse typed input; `None` means there is nothing to submit yet
pub fn parse_answer(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One sitting of practice on a single shape
#[derive(Debug, Clone)]
pub struct PracticeSession {
    shape: ShapeKind,
    index: usize,
    score: u32,
    answered: bool,
}

/// Result of submitting an answer
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub correct: bool,
    pub record: NewPracticeRecord,
}

impl PracticeSession {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            index: 0,
            score: 0,
            answered: false,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn question(&self) -> Question {
        question_for(self.shape, self.index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of the current question, starting at 1
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn answered(&self) -> bool {
        self.answered
    }

    /// Check typed input against the current question.
    ///
    /// Returns `None` without recording anything when the input is not a
    /// number or the question was already answered.
    pub fn submit(&mut self, input: &str) -> Option<Submission> {
        if self.answered {
            return None;
        }
        let user_answer = parse_answer(input)?;
        let question = self.question();
        let correct = question.is_correct(user_answer);
        if correct {
            self.score += 1;
        }
        self.answered = true;

        Some(Submission {
            correct,
            record: NewPracticeRecord {
                geometry_type: self.shape,
                question: question.prompt,
                answer: question.answer,
                user_answer,
                is_correct: correct,
            },
        })
    }

    pub fn next_question(&mut self) {
        self.index += 1;
        self.answered = false;
    }
}
