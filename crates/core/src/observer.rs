/// Receives solver events and decides how the iteration should proceed.
///
/// Solvers never log or record history on their own behalf. Anything a caller
/// wants to see (a bisection trace, a melt crossing, a plot) is collected by an
/// observer passed into the solve call.
///
/// `observe` returns `Some(action)` to request a solver-specific action and
/// `None` to let the solver continue unchanged.
///
/// Closures implement `Observer` automatically, and `()` is a no-op observer.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_observer_never_acts() {
        let mut observer = ();
        let action: Option<&str> = observer.observe(&1.0_f64);
        assert!(action.is_none());
    }

    #[test]
    fn closure_observer_sees_every_event() {
        let mut seen = Vec::new();
        let mut observer = |event: &f64| -> Option<()> {
            seen.push(*event);
            None
        };

        observer.observe(&25.0);
        observer.observe(&65.2);

        assert_eq!(seen, vec![25.0, 65.2]);
    }
}
