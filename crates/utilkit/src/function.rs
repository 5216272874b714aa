//! Function composition helpers.

/// Call every present function in order, skipping `None` entries.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use utilkit::function::batch_invoke;
///
/// let hits = Cell::new(0);
/// let bump: &dyn Fn() = &|| hits.set(hits.get() + 1);
/// batch_invoke([Some(bump), None, Some(bump)]);
/// assert_eq!(hits.get(), 2);
/// ```
pub fn batch_invoke<F, I>(functions: I)
where
    I: IntoIterator<Item = Option<F>>,
    F: FnOnce(),
{
    for f in functions.into_iter().flatten() {
        f();
    }
}

/// Compose two functions: `pipe(f, g)(x) == g(f(x))`.
///
/// # Examples
///
/// ```
/// use utilkit::function::pipe;
///
/// let add_two_then_triple = pipe(|x: i32| x + 2, |x| x * 3);
/// assert_eq!(add_two_then_triple(5), 21);
/// ```
pub fn pipe<A, B, C>(f: impl Fn(A) -> B, g: impl Fn(B) -> C) -> impl Fn(A) -> C {
    move |a| g(f(a))
}

/// A chain of functions applied left to right.
///
/// # Examples
///
/// ```
/// use utilkit::function::Pipeline;
///
/// let pipeline = Pipeline::new(|x: i32| x + 2).then(|x| x * 3).then(|x| x * 2);
/// assert_eq!(pipeline.apply(2), 24);
///
/// let produced = Pipeline::source(|| 7).then(|x| x * 3);
/// assert_eq!(produced.run(), 21);
/// ```
pub struct Pipeline<'f, A, B> {
    f: Box<dyn Fn(A) -> B + 'f>,
}

impl<'f, A: 'f, B: 'f> Pipeline<'f, A, B> {
    pub fn new(first: impl Fn(A) -> B + 'f) -> Self {
        Self { f: Box::new(first) }
    }

    /// Append a step that receives the previous step's output.
    pub fn then<C: 'f>(self, next: impl Fn(B) -> C + 'f) -> Pipeline<'f, A, C> {
        let f = self.f;
        Pipeline {
            f: Box::new(move |a| next(f(a))),
        }
    }

    pub fn apply(&self, input: A) -> B {
        (self.f)(input)
    }
}

impl<'f, B: 'f> Pipeline<'f, (), B> {
    /// Start a pipeline from a producer that takes no input.
    pub fn source(producer: impl Fn() -> B + 'f) -> Self {
        Self::new(move |()| producer())
    }

    pub fn run(&self) -> B {
        self.apply(())
    }
}
