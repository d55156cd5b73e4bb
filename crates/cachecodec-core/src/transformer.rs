//! Reversible, composable mappings between two types.
//!
//! A [`Transformer<A, B>`] converts an `A` into a `B` (`forward`) and back
//! again (`backward`). Either direction may fail with a [`CodecError`](crate::CodecError).
//! Transformers are stateless and shared read-only, so every
//! implementation must be `Send + Sync`.
//!
//! # Composition
//!
//! [`Transformer::and_then`] chains two transformers. The forward
//! direction runs the first then the second; the backward direction runs
//! the second then the first. The first failing stage stops the chain and
//! is reported as [`CodecError::Composition`](crate::CodecError::Composition) with its stage index.
//!
//! # Constant construction
//!
//! [`Pure`], [`Fallible`], [`Identity`], [`AndThen`] and [`Inverse`] all
//! have `const` constructors, so ready-made transformers are declared as
//! `const` items and need no runtime initialization.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{CodecResult, Direction};

/// A reversible mapping between `A` and `B`.
pub trait Transformer<A, B>: Send + Sync {
    /// Maps a value from `A` to `B`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` has no representation in `B`.
    fn forward(&self, value: A) -> CodecResult<B>;

    /// Maps a value from `B` back to `A`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not a valid representation of an `A`.
    fn backward(&self, value: B) -> CodecResult<A>;

    /// Chains `next` after this transformer, producing a `Transformer<A, C>`.
    fn and_then<C, T>(self, next: T) -> AndThen<Self, T, B>
    where
        Self: Sized,
        T: Transformer<B, C>,
    {
        AndThen::new(self, next)
    }

    /// Swaps the two directions, producing a `Transformer<B, A>`.
    fn inverse(self) -> Inverse<Self>
    where
        Self: Sized,
    {
        Inverse::new(self)
    }
}

impl<A, B, T> Transformer<A, B> for &T
where
    T: Transformer<A, B> + ?Sized,
{
    fn forward(&self, value: A) -> CodecResult<B> {
        (**self).forward(value)
    }

    fn backward(&self, value: B) -> CodecResult<A> {
        (**self).backward(value)
    }
}

impl<A, B, T> Transformer<A, B> for Box<T>
where
    T: Transformer<A, B> + ?Sized,
{
    fn forward(&self, value: A) -> CodecResult<B> {
        (**self).forward(value)
    }

    fn backward(&self, value: B) -> CodecResult<A> {
        (**self).backward(value)
    }
}

impl<A, B, T> Transformer<A, B> for Arc<T>
where
    T: Transformer<A, B> + ?Sized,
{
    fn forward(&self, value: A) -> CodecResult<B> {
        (**self).forward(value)
    }

    fn backward(&self, value: B) -> CodecResult<A> {
        (**self).backward(value)
    }
}

/// A transformer that never fails, built from two plain functions.
///
/// Used for isomorphisms such as a timestamp and its nanosecond count.
pub struct Pure<A, B> {
    forward: fn(A) -> B,
    backward: fn(B) -> A,
}

impl<A, B> Pure<A, B> {
    /// Creates a pure transformer from its two directions.
    #[must_use]
    pub const fn new(forward: fn(A) -> B, backward: fn(B) -> A) -> Self {
        Self { forward, backward }
    }

    /// Applies the forward direction without a `Result`.
    pub fn apply(&self, value: A) -> B {
        (self.forward)(value)
    }

    /// Applies the backward direction without a `Result`.
    pub fn invert(&self, value: B) -> A {
        (self.backward)(value)
    }
}

impl<A, B> Transformer<A, B> for Pure<A, B> {
    fn forward(&self, value: A) -> CodecResult<B> {
        Ok(self.apply(value))
    }

    fn backward(&self, value: B) -> CodecResult<A> {
        Ok(self.invert(value))
    }
}

impl<A, B> Clone for Pure<A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B> Copy for Pure<A, B> {}

impl<A, B> fmt::Debug for Pure<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pure").finish_non_exhaustive()
    }
}

/// A transformer whose directions may fail, built from two plain functions.
pub struct Fallible<A, B> {
    forward: fn(A) -> CodecResult<B>,
    backward: fn(B) -> CodecResult<A>,
}

impl<A, B> Fallible<A, B> {
    /// Creates a fallible transformer from its two directions.
    #[must_use]
    pub const fn new(forward: fn(A) -> CodecResult<B>, backward: fn(B) -> CodecResult<A>) -> Self {
        Self { forward, backward }
    }
}

impl<A, B> Transformer<A, B> for Fallible<A, B> {
    fn forward(&self, value: A) -> CodecResult<B> {
        (self.forward)(value)
    }

    fn backward(&self, value: B) -> CodecResult<A> {
        (self.backward)(value)
    }
}

impl<A, B> Clone for Fallible<A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B> Copy for Fallible<A, B> {}

impl<A, B> fmt::Debug for Fallible<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallible").finish_non_exhaustive()
    }
}

/// The transformer that returns its input unchanged in both directions.
pub struct Identity<T>(PhantomData<fn(T) -> T>);

impl<T> Identity<T> {
    /// Creates the identity transformer for `T`.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Identity<T> {}

impl<T> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identity")
    }
}

impl<T> Transformer<T, T> for Identity<T> {
    fn forward(&self, value: T) -> CodecResult<T> {
        Ok(value)
    }

    fn backward(&self, value: T) -> CodecResult<T> {
        Ok(value)
    }
}

/// Two transformers applied in sequence through the intermediate type `B`.
///
/// Created by [`Transformer::and_then`] or [`AndThen::new`].
pub struct AndThen<T1, T2, B> {
    first: T1,
    second: T2,
    _intermediate: PhantomData<fn(B) -> B>,
}

impl<T1, T2, B> AndThen<T1, T2, B> {
    /// Chains `second` after `first`.
    #[must_use]
    pub const fn new(first: T1, second: T2) -> Self {
        Self { first, second, _intermediate: PhantomData }
    }

    /// The transformer applied first in the forward direction.
    pub fn first(&self) -> &T1 {
        &self.first
    }

    /// The transformer applied second in the forward direction.
    pub fn second(&self) -> &T2 {
        &self.second
    }
}

impl<A, B, C, T1, T2> Transformer<A, C> for AndThen<T1, T2, B>
where
    T1: Transformer<A, B>,
    T2: Transformer<B, C>,
{
    fn forward(&self, value: A) -> CodecResult<C> {
        let intermediate =
            self.first.forward(value).map_err(|e| e.at_stage(0, Direction::Forward))?;
        self.second.forward(intermediate).map_err(|e| e.at_stage(1, Direction::Forward))
    }

    fn backward(&self, value: C) -> CodecResult<A> {
        let intermediate =
            self.second.backward(value).map_err(|e| e.at_stage(1, Direction::Backward))?;
        self.first.backward(intermediate).map_err(|e| e.at_stage(0, Direction::Backward))
    }
}

impl<T1: Clone, T2: Clone, B> Clone for AndThen<T1, T2, B> {
    fn clone(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }
}

impl<T1: Copy, T2: Copy, B> Copy for AndThen<T1, T2, B> {}

impl<T1: fmt::Debug, T2: fmt::Debug, B> fmt::Debug for AndThen<T1, T2, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AndThen").field("first", &self.first).field("second", &self.second).finish()
    }
}

/// A transformer with its directions swapped.
#[derive(Debug, Clone, Copy)]
pub struct Inverse<T>(T);

impl<T> Inverse<T> {
    /// Wraps `inner` so that its backward direction becomes forward.
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the wrapped transformer.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<A, B, T> Transformer<B, A> for Inverse<T>
where
    T: Transformer<A, B>,
{
    fn forward(&self, value: B) -> CodecResult<A> {
        self.0.backward(value)
    }

    fn backward(&self, value: A) -> CodecResult<B> {
        self.0.forward(value)
    }
}
