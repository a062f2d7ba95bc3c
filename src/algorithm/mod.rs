/// Efficient bitset implementation for cell domains
pub mod bitset;
/// Presenter and cancellation hooks for the solve loop
pub mod observer;
/// Constraint propagation sweep over the grid
pub mod propagation;
/// Random choice and lowest-entropy cell selection
pub mod selection;
/// Grid solver orchestrating collapse and propagation
pub mod solver;
