//! Subsurface Sample Collector

use super::*;
use core::bssrdf::*;
use core::geometry::*;
use core::interaction::*;
use core::pbrt::*;

/// An incoming point reported by the subsurface sampler.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SubsurfaceHit {
    /// Incoming position.
    pub point: Point3f,

    /// Shading normal at the incoming position.
    pub normal: Vector3f,

    /// MIS weighted probability.
    pub probability: Float,

    /// Spectral channel of the profile sample.
    pub channel: usize,
}

/// A visitor that keeps up to a fixed number of incoming points.
#[derive(Clone, Debug, Default)]
pub struct SubsurfaceSampleCollector {
    /// Maximum number of hits kept.
    max_samples: usize,

    /// Hits kept so far.
    hits: Vec<SubsurfaceHit>,

    /// Number of hits dropped because the collector was full.
    overflow: usize,
}

impl SubsurfaceSampleCollector {
    /// Create a new `SubsurfaceSampleCollector`.
    ///
    /// * `max_samples` - Maximum number of hits kept.
    pub fn new(max_samples: usize) -> Self {
        Self {
            max_samples,
            hits: Vec::with_capacity(max_samples),
            overflow: 0,
        }
    }

    /// Returns the hits kept so far.
    pub fn hits(&self) -> &[SubsurfaceHit] {
        &self.hits
    }

    /// Returns the number of dropped hits.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Returns true if no more hits can be kept.
    pub fn is_full(&self) -> bool {
        self.hits.len() >= self.max_samples
    }

    /// Drops all hits so the collector can be reused.
    pub fn clear(&mut self) {
        self.hits.clear();
        self.overflow = 0;
    }
}

impl SubsurfaceVisitor for SubsurfaceSampleCollector {
    fn visit(&mut self, sample: &BSSRDFSample, incoming_point: &ShadingPoint, probability: Float) {
        if self.is_full() {
            self.overflow += 1;
            return;
        }

        self.hits.push(SubsurfaceHit {
            point: incoming_point.point(),
            normal: incoming_point.shading_normal(),
            probability,
            channel: sample.channel(),
        });
    }
}
