//! Edge case tests for aflang-parse, covering the boundary behaviors called
//! out in the language specification.
