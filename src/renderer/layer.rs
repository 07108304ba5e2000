//! Balanced drawing-state scopes

/// A context with a save/restore state stack
pub trait StateStack {
    fn save(&self);
    fn restore(&self);
}

/// Runs `draw` inside a save/restore pair. The restore happens on every
/// path, including when `draw` bails out early with an error.
pub fn isolated<S, T, E, F>(stack: &S, draw: F) -> Result<T, E>
where
    S: StateStack + ?Sized,
    F: FnOnce(&S) -> Result<T, E>,
{
    stack.save();
    let result = draw(stack);
    stack.restore();
    result
}
