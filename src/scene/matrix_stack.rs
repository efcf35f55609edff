//! Last-in-first-out stack of model matrices.
//!
//! Used to save the accumulated parent transform before descending into a
//! child subtree and restore it before the next sibling.

use glam::Mat4;

/// LIFO container of 4×4 transforms.
///
/// Popping an empty stack is defined behavior: it yields
/// [`Mat4::IDENTITY`]. Each such underflow is counted and logged so that an
/// unbalanced push/pop sequence stays observable.
#[derive(Debug, Clone, Default)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
    underflows: u32,
}

impl MatrixStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a matrix onto the top of the stack.
    pub fn push(&mut self, matrix: Mat4) {
        self.stack.push(matrix);
    }

    /// Remove and return the top matrix, or identity if the stack is empty.
    pub fn pop(&mut self) -> Mat4 {
        self.stack.pop().unwrap_or_else(|| {
            self.underflows += 1;
            log::warn!(
                "matrix stack underflow ({} so far), substituting identity",
                self.underflows
            );
            Mat4::IDENTITY
        })
    }

    /// Top of the stack without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Mat4> {
        self.stack.last()
    }

    /// Number of matrices currently stored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the stack holds no matrices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// How many pops hit an empty stack since creation (or the last
    /// [`clear`](Self::clear)).
    #[must_use]
    pub fn underflows(&self) -> u32 {
        self.underflows
    }

    /// Drop all matrices and reset the underflow counter.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.underflows = 0;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let m1 = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let m2 = Mat4::from_scale(Vec3::splat(2.0));

        let mut stack = MatrixStack::new();
        stack.push(m1);
        stack.push(m2);

        assert_eq!(stack.pop(), m2);
        assert_eq!(stack.pop(), m1);
        assert_eq!(stack.pop(), Mat4::IDENTITY);
    }

    #[test]
    fn empty_pop_counts_underflow() {
        let mut stack = MatrixStack::new();
        assert_eq!(stack.underflows(), 0);

        assert_eq!(stack.pop(), Mat4::IDENTITY);
        assert_eq!(stack.pop(), Mat4::IDENTITY);
        assert_eq!(stack.underflows(), 2);
        assert!(stack.is_empty());

        stack.clear();
        assert_eq!(stack.underflows(), 0);
    }

    #[test]
    fn depth_and_peek_track_top() {
        let mut stack = MatrixStack::new();
        assert!(stack.peek().is_none());

        let top = Mat4::from_rotation_x(0.5);
        stack.push(Mat4::IDENTITY);
        stack.push(top);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.peek(), Some(&top));

        let _ = stack.pop();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.underflows(), 0);
    }
}
