//! Recording target for tests

use std::cell::RefCell;
use std::rc::Rc;

use tether_core::{Rect, Size, Stream, Subject};

use crate::target::{BaselineOrigin, CommitContext, RectProperty, Target};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Commit {
    pub property: RectProperty,
    pub rect: Rect,
    pub context: CommitContext,
}

/// A target whose streams are driven by hand and whose commits are recorded
pub(crate) struct RecordingTarget {
    pub bounds: Subject<Rect>,
    pub intrinsic_size: Subject<Size>,
    pub baseline_offset: Subject<f64>,
    pub baseline_origin: BaselineOrigin,
    commits: RefCell<Vec<Commit>>,
}

impl RecordingTarget {
    pub fn new(intrinsic_size: Size) -> Rc<Self> {
        Self::with_baseline(intrinsic_size, 0.0, BaselineOrigin::MaxY)
    }

    pub fn with_baseline(intrinsic_size: Size, offset: f64, origin: BaselineOrigin) -> Rc<Self> {
        Rc::new(Self {
            bounds: Subject::with_value(Rect::with_size(intrinsic_size)),
            intrinsic_size: Subject::with_value(intrinsic_size),
            baseline_offset: Subject::with_value(offset),
            baseline_origin: origin,
            commits: RefCell::new(Vec::new()),
        })
    }

    pub fn commits(&self) -> Vec<Commit> {
        self.commits.borrow().clone()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.commits.borrow().iter().map(|commit| commit.rect).collect()
    }

    pub fn commit_count(&self) -> usize {
        self.commits.borrow().len()
    }
}

impl Target for RecordingTarget {
    fn bounds(&self) -> Stream<Rect> {
        self.bounds.stream()
    }

    fn intrinsic_content_size(&self) -> Stream<Size> {
        self.intrinsic_size.stream()
    }

    fn baseline_offsets(&self) -> Stream<f64> {
        self.baseline_offset.stream()
    }

    fn baseline_origin(&self) -> BaselineOrigin {
        self.baseline_origin
    }

    fn set_rect(&self, property: RectProperty, rect: Rect, context: CommitContext) {
        self.commits.borrow_mut().push(Commit {
            property,
            rect,
            context,
        });
    }
}
