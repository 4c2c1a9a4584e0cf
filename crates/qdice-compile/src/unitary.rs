//! Single-qubit unitary matrices.
//!
//! Used to check that rewrites of a qubit's gate sequence leave its
//! measurement statistics intact.

use num_complex::Complex64;
use qdice_ir::{Instruction, StandardGate};

/// Tolerance for floating point comparisons.
const EPSILON: f64 = 1e-10;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    fn real(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(a.into(), b.into(), c.into(), d.into())
    }

    fn diagonal(phase: f64) -> Self {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        Self::new(one, zero, zero, Complex64::from_polar(1.0, phase))
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::real(1.0, 0.0, 0.0, 1.0)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        Self::real(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::real(0.0, 1.0, 1.0, 0.0)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self::new(zero, Complex64::new(0.0, -1.0), Complex64::new(0.0, 1.0), zero)
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::real(1.0, 0.0, 0.0, -1.0)
    }

    /// Create an S gate (sqrt(Z)).
    pub fn s() -> Self {
        Self::diagonal(std::f64::consts::FRAC_PI_2)
    }

    /// Create an S-dagger gate.
    pub fn sdg() -> Self {
        Self::diagonal(-std::f64::consts::FRAC_PI_2)
    }

    /// Create an SX gate (sqrt(X)).
    pub fn sx() -> Self {
        let half = Complex64::new(0.5, 0.0);
        let half_i = Complex64::new(0.0, 0.5);
        Self::new(half + half_i, half - half_i, half - half_i, half + half_i)
    }

    /// Create an SX-dagger gate.
    pub fn sxdg() -> Self {
        Self::sx().dagger()
    }

    /// Create an RX rotation matrix.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// Create an RY rotation matrix.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::real(c, -s, s, c)
    }

    /// Create an RZ rotation matrix.
    pub fn rz(theta: f64) -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self::new(
            Complex64::from_polar(1.0, -theta / 2.0),
            zero,
            zero,
            Complex64::from_polar(1.0, theta / 2.0),
        )
    }

    /// Matrix of a standard gate, or `None` if its angle cannot be evaluated.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        Some(match gate {
            StandardGate::I => Self::identity(),
            StandardGate::X => Self::x(),
            StandardGate::Y => Self::y(),
            StandardGate::Z => Self::z(),
            StandardGate::H => Self::h(),
            StandardGate::S => Self::s(),
            StandardGate::Sdg => Self::sdg(),
            StandardGate::SX => Self::sx(),
            StandardGate::SXdg => Self::sxdg(),
            StandardGate::Rx(theta) => Self::rx(theta.as_f64()?),
            StandardGate::Ry(theta) => Self::ry(theta.as_f64()?),
            StandardGate::Rz(theta) => Self::rz(theta.as_f64()?),
        })
    }

    /// Overall unitary of a gate sequence given in program order.
    ///
    /// Non-gate instructions are skipped.
    pub fn from_sequence<'a>(instructions: impl IntoIterator<Item = &'a Instruction>) -> Option<Self> {
        instructions
            .into_iter()
            .filter_map(Instruction::as_gate)
            .try_fold(Self::identity(), |acc, gate| Some(Self::from_gate(gate)? * acc))
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;
        b.norm() < EPSILON && c.norm() < EPSILON && (a - d).norm() < EPSILON
    }

    /// Check if two unitaries agree up to global phase.
    pub fn equivalent(&self, other: &Self) -> bool {
        (self.dagger() * *other).is_identity()
    }

    /// Outcome probabilities `[P(0), P(1)]` after applying this unitary to |0>.
    pub fn outcome_probabilities(&self) -> [f64; 2] {
        [self.data[0].norm_sqr(), self.data[2].norm_sqr()]
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
