//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellAddress,
    CellProperty,
    // Error types
    Error,
    // Expression types
    ExpressionTree,
    FormulaError,
    // Main types
    Grid,
    // Extension traits
    GridCalculationExt,
    GridOptions,
    ListenerId,
    Propagation,
    Result,
    Token,
};
