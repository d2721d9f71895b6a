//! Callback types for refs, lifecycle hooks and event handlers.
//!
//! All callbacks receive their argument by reference and are wrapped in an
//! `Rc`, which makes them cheap to clone and lets the reconciler compare them
//! by identity when deciding whether a property changed between passes.
//!
//! ## Example
//!
//! ```
//! use reinhardt_vdom::callback::Callback;
//!
//! let greet = Callback::new(|name: &String| println!("hello {name}"));
//! let same = greet.clone();
//! assert!(greet.ptr_eq(&same));
//! greet.call(&"world".to_string());
//! ```

use std::cell::Cell;
use std::rc::Rc;

/// A cloneable, identity-comparable callback taking `&T`.
pub struct Callback<T> {
	inner: Rc<dyn Fn(&T) + 'static>,
}

/// Callback receiving a live node (refs and lifecycle hooks).
pub type NodeCallback<N> = Callback<N>;

/// Callback receiving an [`Event`] dispatched on a live node.
pub type EventHandler<N> = Callback<Event<N>>;

impl<T> Callback<T> {
	/// Wraps a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&T) + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// A callback that does nothing.
	pub fn noop() -> Self {
		Self::new(|_| {})
	}

	/// Invokes the callback.
	pub fn call(&self, arg: &T) {
		(self.inner)(arg)
	}

	/// Returns true if both callbacks wrap the same allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<T> Clone for Callback<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T> std::fmt::Debug for Callback<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

/// An event delivered to a listener installed by the reconciler.
#[derive(Debug)]
pub struct Event<N> {
	name: String,
	target: N,
	default_prevented: Cell<bool>,
}

impl<N> Event<N> {
	/// Creates an event named `name` (lowercase, without the `on` prefix).
	pub fn new(name: impl Into<String>, target: N) -> Self {
		Self {
			name: name.into(),
			target,
			default_prevented: Cell::new(false),
		}
	}

	/// The event name, e.g. `"click"`.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The live node the listener is installed on.
	pub fn target(&self) -> &N {
		&self.target
	}

	/// Marks the event's default action as cancelled.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// Whether [`prevent_default`](Self::prevent_default) was called.
	pub fn is_default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::RefCell;

	#[rstest]
	fn test_callback_call() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let callback = Callback::new({
			let seen = Rc::clone(&seen);
			move |value: &i32| seen.borrow_mut().push(*value)
		});

		callback.call(&1);
		callback.call(&2);

		assert_eq!(*seen.borrow(), vec![1, 2]);
	}

	#[rstest]
	fn test_callback_identity() {
		let a = Callback::new(|_: &i32| {});
		let b = Callback::new(|_: &i32| {});

		assert!(a.ptr_eq(&a.clone()));
		assert!(!a.ptr_eq(&b));
	}

	#[rstest]
	fn test_event_prevent_default() {
		let event = Event::new("submit", ());
		assert_eq!(event.name(), "submit");
		assert!(!event.is_default_prevented());

		event.prevent_default();
		assert!(event.is_default_prevented());
	}
}
