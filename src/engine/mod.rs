pub(crate) mod board;
pub(crate) mod grid;
pub(crate) mod history;
