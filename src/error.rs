//! Error types for the adapter layer and the engines it drives.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

use crate::composite::ForceGraphMode;

/// Faults reported by an engine instance.
#[derive(Clone, Debug, Error)]
pub enum EngineError {
	/// The engine's global constructor is not loaded on the page.
	#[error("engine constructor `{0}` is not available")]
	MissingConstructor(&'static str),

	/// The engine instance has no method with this name.
	#[error("engine has no method `{0}`")]
	MissingMethod(&'static str),

	/// The engine threw while handling a call.
	#[error("engine threw: {0}")]
	Thrown(String),

	/// A method returned a value of an unexpected shape.
	#[error("unexpected return value from `{method}`: {reason}")]
	BadReturn {
		method: &'static str,
		reason: String,
	},
}

impl EngineError {
	/// Wrap a value thrown on the JS side, keeping its message when it is an `Error`.
	pub fn thrown(value: JsValue) -> Self {
		let message = match value.dyn_ref::<js_sys::Error>() {
			Some(err) => String::from(err.message()),
			None => value
				.as_string()
				.unwrap_or_else(|| String::from("non-error value thrown")),
		};
		Self::Thrown(message)
	}
}

/// Faults raised by an [`Adapter`](crate::Adapter), its handle, or the composite dispatcher.
#[derive(Clone, Debug, Error)]
pub enum AdapterError {
	#[error("{component}: no container element to mount into")]
	MissingContainer { component: &'static str },

	#[error("{component}: an engine instance is already mounted")]
	AlreadyMounted { component: &'static str },

	/// A bound method was called while no engine instance exists.
	#[error("{component}: `{method}` called with no mounted engine instance")]
	Detached {
		component: &'static str,
		method: &'static str,
	},

	/// The engine is already borrowed further up the stack (a callback re-entered the handle).
	#[error("{component}: `{method}` re-entered while the engine is busy")]
	Busy {
		component: &'static str,
		method: &'static str,
	},

	/// The composite's active mode has no such method.
	#[error("`{method}` is not available in {mode} mode")]
	Unsupported {
		mode: ForceGraphMode,
		method: &'static str,
	},

	#[error("{component}: {source}")]
	Engine {
		component: &'static str,
		#[source]
		source: EngineError,
	},
}

impl AdapterError {
	pub(crate) fn engine(component: &'static str) -> impl FnOnce(EngineError) -> Self {
		move |source| Self::Engine { component, source }
	}
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
