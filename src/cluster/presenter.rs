//! Presenters: observers that receive a snapshot after every iteration.
//!
//! The engines call [`Presenter::present`] synchronously. Everything here is a
//! plain observer; rendering belongs to the caller.

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use super::traits::Presenter;
use crate::point::Point;

/// Writes a text block per iteration:
///
/// ```text
/// 0:
///   clusters=[[(0, 0), (1, 1)], [(10, 10)]]
///   centroids=[(0, 0), (10, 10)]
/// ```
#[derive(Debug)]
pub struct PrintingPresenter<W = io::Stdout> {
    out: W,
}

impl PrintingPresenter<io::Stdout> {
    /// Print to standard output.
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for PrintingPresenter<io::Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> PrintingPresenter<W> {
    /// Print to an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for PrintingPresenter<W> {
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]) {
        let block = format!(
            "{iteration}:\n  clusters={}\n  centroids={}\n",
            Listing(clusters),
            Listing(centroids)
        );
        if let Err(err) = self.out.write_all(block.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!(iteration, error = %err, "printing presenter failed to write");
        }
    }
}

/// Emits one `tracing` event per iteration at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPresenter;

impl Presenter for LoggingPresenter {
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]) {
        let sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
        tracing::info!(
            iteration,
            clusters = ?sizes,
            centroids = %Listing(centroids),
            "iteration"
        );
    }
}

/// Forwards every snapshot to each inner presenter, in order.
#[derive(Default)]
pub struct ChainingPresenter {
    presenters: Vec<Box<dyn Presenter>>,
}

impl ChainingPresenter {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a presenter to the chain.
    pub fn with(mut self, presenter: impl Presenter + 'static) -> Self {
        self.push(presenter);
        self
    }

    /// Append a presenter to the chain.
    pub fn push(&mut self, presenter: impl Presenter + 'static) {
        self.presenters.push(Box::new(presenter));
    }

    /// Number of chained presenters.
    pub fn len(&self) -> usize {
        self.presenters.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.presenters.is_empty()
    }
}

impl FromIterator<Box<dyn Presenter>> for ChainingPresenter {
    fn from_iter<I: IntoIterator<Item = Box<dyn Presenter>>>(iter: I) -> Self {
        Self {
            presenters: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for ChainingPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingPresenter")
            .field("len", &self.presenters.len())
            .finish()
    }
}

impl Presenter for ChainingPresenter {
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]) {
        for presenter in &mut self.presenters {
            presenter.present(iteration, clusters, centroids);
        }
    }
}

/// One presented iteration, copied out of the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Iteration index as passed to the presenter.
    pub iteration: usize,
    /// Clusters at that iteration.
    pub clusters: Vec<Vec<Point>>,
    /// Centroids the clusters were assigned against.
    pub centroids: Vec<Point>,
}

/// Records every snapshot it is shown.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Drop all recorded snapshots.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Take the recorded snapshots, leaving the history empty.
    pub fn take(&mut self) -> Vec<Snapshot> {
        std::mem::take(&mut self.snapshots)
    }
}

impl Presenter for History {
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]) {
        self.snapshots.push(Snapshot {
            iteration,
            clusters: clusters.to_vec(),
            centroids: centroids.to_vec(),
        });
    }
}

/// Presenter backed by a closure. See [`from_fn`].
#[derive(Clone)]
pub struct FnPresenter<F> {
    f: F,
}

/// Wrap a closure as a [`Presenter`].
///
/// ```rust
/// use kstream::{from_fn, IncrementalKmeans, Point};
///
/// let mut seen = 0;
/// let mut engine = IncrementalKmeans::new(2)
///     .unwrap()
///     .with_presenter(from_fn(|_iteration, _clusters, _centroids| seen += 1));
/// engine.add_point(Point::new(1.0, 1.0)).unwrap();
/// drop(engine);
/// assert_eq!(seen, 1);
/// ```
pub fn from_fn<F>(f: F) -> FnPresenter<F>
where
    F: FnMut(usize, &[Vec<Point>], &[Point]),
{
    FnPresenter { f }
}

impl<F> fmt::Debug for FnPresenter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPresenter").finish_non_exhaustive()
    }
}

impl<F> Presenter for FnPresenter<F>
where
    F: FnMut(usize, &[Vec<Point>], &[Point]),
{
    fn present(&mut self, iteration: usize, clusters: &[Vec<Point>], centroids: &[Point]) {
        (self.f)(iteration, clusters, centroids);
    }
}

/// `[a, b, ...]` using each element's `Display`.
struct Listing<'a, T>(&'a [T]);

impl<T: ListItem> fmt::Display for Listing<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.fmt_item(f)?;
        }
        f.write_char(']')
    }
}

trait ListItem {
    fn fmt_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl ListItem for Point {
    fn fmt_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl ListItem for Vec<Point> {
    fn fmt_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Listing(self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample() -> (Vec<Vec<Point>>, Vec<Point>) {
        let clusters = vec![
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![Point::new(10.0, 10.0)],
        ];
        let centroids = vec![Point::new(0.5, 0.5), Point::new(10.0, 10.0)];
        (clusters, centroids)
    }

    #[test]
    fn printing_format() {
        let (clusters, centroids) = sample();
        let mut printer = PrintingPresenter::new(Vec::new());
        printer.present(2, &clusters, &centroids);
        let text = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(
            text,
            "2:\n  clusters=[[(0, 0), (1, 1)], [(10, 10)]]\n  centroids=[(0.5, 0.5), (10, 10)]\n"
        );
    }

    #[test]
    fn history_records_copies() {
        let (clusters, centroids) = sample();
        let mut history = History::new();
        history.present(0, &clusters, &centroids);
        history.present(1, &clusters[..1], &centroids[..1]);

        assert_eq!(history.snapshots().len(), 2);
        assert_eq!(history.snapshots()[0].clusters, clusters);
        assert_eq!(history.last().unwrap().iteration, 1);
        assert_eq!(history.take().len(), 2);
        assert!(history.snapshots().is_empty());
    }

    #[test]
    fn chain_forwards_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&log);
        let second = Rc::clone(&log);

        let mut chain = ChainingPresenter::new()
            .with(from_fn(move |i, _: &[Vec<Point>], _: &[Point]| {
                first.borrow_mut().push(("first", i))
            }))
            .with(from_fn(move |i, _: &[Vec<Point>], _: &[Point]| {
                second.borrow_mut().push(("second", i))
            }));
        assert_eq!(chain.len(), 2);

        let (clusters, centroids) = sample();
        chain.present(0, &clusters, &centroids);
        chain.present(1, &clusters, &centroids);

        assert_eq!(
            *log.borrow(),
            vec![("first", 0), ("second", 0), ("first", 1), ("second", 1)]
        );
    }

    #[test]
    fn empty_chain_is_a_no_op() {
        let (clusters, centroids) = sample();
        let mut chain = ChainingPresenter::new();
        assert!(chain.is_empty());
        chain.present(0, &clusters, &centroids);
    }

    #[test]
    fn boxed_and_borrowed_presenters() {
        fn feed(mut presenter: impl Presenter) {
            let (clusters, centroids) = sample();
            presenter.present(0, &clusters, &centroids);
        }

        let mut history = History::new();
        feed(&mut history);
        feed(&mut history);
        assert_eq!(history.snapshots().len(), 2);

        let boxed: Box<dyn Presenter> = Box::new(History::new());
        feed(boxed);
        feed(());
    }
}
