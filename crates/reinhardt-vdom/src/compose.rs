//! Function composition.
//!
//! [`compose`] folds a list of single-argument transforms right to left, so
//! `compose(vec![f, g])` applied to `x` is `f(g(x))`.
//!
//! ```
//! use std::rc::Rc;
//! use reinhardt_vdom::compose::{compose, Transform};
//!
//! let add_one: Transform<i32> = Rc::new(|x| x + 1);
//! let double: Transform<i32> = Rc::new(|x| x * 2);
//!
//! assert_eq!(compose(vec![add_one, double])(5), 11);
//! ```

use std::rc::Rc;

/// A shared single-argument transform.
pub type Transform<T> = Rc<dyn Fn(T) -> T>;

/// Composes transforms right to left.
///
/// An empty list yields the identity. A single transform is returned as is
/// (the same allocation).
pub fn compose<T: 'static>(transforms: Vec<Transform<T>>) -> Transform<T> {
	transforms
		.into_iter()
		.reduce(|outer, inner| -> Transform<T> { Rc::new(move |x: T| outer(inner(x))) })
		.unwrap_or_else(|| Rc::new(|x: T| x))
}

/// Composes two functions of possibly different types: `compose2(f, g)(x)`
/// is `f(g(x))`.
pub fn compose2<A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> C
where
	F: Fn(B) -> C,
	G: Fn(A) -> B,
{
	move |x| f(g(x))
}
