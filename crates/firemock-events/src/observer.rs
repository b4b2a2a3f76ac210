//! Observer records and registration call-shape normalization.

/// Callback invoked with each emitted value.
pub type NextFn<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Callback invoked when the source signals an error.
pub type ErrorFn<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Callback invoked when the source completes.
pub type CompleteFn = Box<dyn Fn() + Send + Sync>;

/// The canonical `{next, error, complete}` listener record.
///
/// Every registration call shape is normalized into this record before any
/// side effect occurs.
pub struct Observer<T, E> {
    pub next: NextFn<T>,
    pub error: Option<ErrorFn<E>>,
    pub complete: Option<CompleteFn>,
}

impl<T, E> Observer<T, E> {
    /// An observer with only a `next` callback.
    pub fn new(next: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self {
            next: Box::new(next),
            error: None,
            complete: None,
        }
    }

    /// Collapse any registration call shape into the canonical record.
    ///
    /// Pure: no registration or delivery happens here.
    pub fn normalize(args: ObserverArgs<T, E>) -> Observer<T, E> {
        match args {
            ObserverArgs::Next(next) => Observer {
                next,
                error: None,
                complete: None,
            },
            ObserverArgs::Callbacks {
                next,
                error,
                complete,
            } => Observer {
                next,
                error,
                complete,
            },
            ObserverArgs::Observer(observer) => observer,
            ObserverArgs::WithOptions(inner) => Self::normalize(*inner),
        }
    }
}

/// The registration call shapes accepted by `on_snapshot`-style operations.
///
/// Mirrors the emulated API surface: a bare `next` callback, a positional
/// callback triple, a pre-built observer record, and each of those preceded
/// by a listen-options value that the emulation accepts and ignores.
pub enum ObserverArgs<T, E> {
    /// Bare `next` callback.
    Next(NextFn<T>),
    /// Positional `next`, `error`, `complete` callbacks.
    Callbacks {
        next: NextFn<T>,
        error: Option<ErrorFn<E>>,
        complete: Option<CompleteFn>,
    },
    /// A pre-built observer record.
    Observer(Observer<T, E>),
    /// Any other shape preceded by an ignored options argument.
    WithOptions(Box<ObserverArgs<T, E>>),
}

impl<T, E> ObserverArgs<T, E> {
    /// The bare-callback shape.
    pub fn next(next: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self::Next(Box::new(next))
    }

    /// The positional-callbacks shape.
    pub fn callbacks(
        next: impl Fn(&T) + Send + Sync + 'static,
        error: impl Fn(&E) + Send + Sync + 'static,
        complete: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self::Callbacks {
            next: Box::new(next),
            error: Some(Box::new(error)),
            complete: Some(Box::new(complete)),
        }
    }

    /// The observer-record shape.
    pub fn observer(observer: Observer<T, E>) -> Self {
        Self::Observer(observer)
    }

    /// Prefix any shape with an options argument. The options carry no
    /// meaning in the emulation and are dropped here.
    pub fn with_options<O>(_options: O, inner: ObserverArgs<T, E>) -> Self {
        Self::WithOptions(Box::new(inner))
    }
}
