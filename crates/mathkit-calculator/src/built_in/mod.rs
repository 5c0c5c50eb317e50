//! Built-in calculators, grouped the way the front end groups its tools.

// Basic math
pub mod basic;

// Algebra & calculus
pub mod algebra;
pub mod calculus;

// Geometry & trigonometry
pub mod geometry;

// Matrices, vectors & signals
pub mod matrix;

// Statistics & probability
pub mod statistics;

// Money
pub mod finance;

// Physics
pub mod physics;
