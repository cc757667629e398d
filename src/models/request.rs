//! I/O request model and request-set generation.
//!
//! A run works over a fixed universe of 30 requests, generated once and
//! partitioned into three arrival waves of 10. Waves are released into the
//! pending queue at fixed processed-count milestones (see
//! [`crate::simulation`]).
//!
//! # Geometry
//!
//! | Field | Range |
//! |-------|-------|
//! | cylinder | 0..=39 |
//! | surface | 0..=9 |
//! | sector | 0..=15 |

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::validation::validate_requests;

/// Number of cylinders; valid cylinders are `0..CYLINDER_COUNT`.
pub const CYLINDER_COUNT: u32 = 40;
/// Number of recording surfaces.
pub const SURFACE_COUNT: u32 = 10;
/// Sectors per track.
pub const SECTOR_COUNT: u32 = 16;
/// Highest valid cylinder.
pub const MAX_CYLINDER: u32 = CYLINDER_COUNT - 1;

/// Requests per arrival wave.
pub const WAVE_SIZE: usize = 10;
/// Number of arrival waves.
pub const WAVE_COUNT: usize = 3;
/// Total requests in a run.
pub const REQUEST_COUNT: usize = WAVE_SIZE * WAVE_COUNT;

/// A single disk I/O request.
///
/// Immutable once generated. `id` is 1-based and doubles as the arrival
/// order: lower ids arrived earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Request {
    /// Unique, stable request identifier (1-based).
    pub id: u32,
    /// Target cylinder (0..=39).
    pub cylinder: u32,
    /// Target surface (0..=9).
    pub surface: u32,
    /// Target sector (0..=15).
    pub sector: u32,
}

impl Request {
    /// Creates a request on surface 0, sector 0.
    pub fn new(id: u32, cylinder: u32) -> Self {
        Self {
            id,
            cylinder,
            surface: 0,
            sector: 0,
        }
    }

    /// Sets the surface.
    pub fn with_surface(mut self, surface: u32) -> Self {
        self.surface = surface;
        self
    }

    /// Sets the sector.
    pub fn with_sector(mut self, sector: u32) -> Self {
        self.sector = sector;
        self
    }

    /// Seek distance from `head` to this request's cylinder.
    #[inline]
    pub fn distance_from(&self, head: u32) -> u32 {
        self.cylinder.abs_diff(head)
    }

    /// Arrival wave this request belongs to.
    pub fn wave(&self) -> WaveIndex {
        let index = (self.id.saturating_sub(1) as usize / WAVE_SIZE + 1).min(WAVE_COUNT);
        WaveIndex::new(index as u8)
    }
}

/// 1-based arrival wave index (1, 2 or 3).
///
/// Out-of-range values are clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WaveIndex(u8);

impl WaveIndex {
    /// The first wave, released when a run starts.
    pub const FIRST: WaveIndex = WaveIndex(1);
    /// The final wave.
    pub const LAST: WaveIndex = WaveIndex(WAVE_COUNT as u8);

    /// Creates a wave index, clamped to `1..=3`.
    pub fn new(index: u8) -> Self {
        Self(index.clamp(1, WAVE_COUNT as u8))
    }

    /// The raw 1-based index.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The following wave, or `None` for the last one.
    pub fn next(self) -> Option<Self> {
        (self < Self::LAST).then(|| Self(self.0 + 1))
    }

    /// Position range of this wave's requests in generation order.
    pub fn span(self) -> std::ops::Range<usize> {
        let start = (self.0 as usize - 1) * WAVE_SIZE;
        start..start + WAVE_SIZE
    }
}

impl Default for WaveIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for WaveIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed universe of requests for a run, in generation order.
///
/// Owns the requests; the engine copies a wave into its pending queue when
/// that wave is released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSet {
    requests: Vec<Request>,
}

impl RequestSet {
    /// Generates 30 random requests.
    ///
    /// `Some(seed)` gives a reproducible set; `None` draws entropy from the OS.
    pub fn generate(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::generate_with(&mut rng)
    }

    /// Generates 30 requests from a caller-supplied RNG.
    ///
    /// Cylinder, surface and sector are drawn independently and uniformly;
    /// ids run 1..=30 in draw order.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let requests = (1..=REQUEST_COUNT as u32)
            .map(|id| Request {
                id,
                cylinder: rng.random_range(0..CYLINDER_COUNT),
                surface: rng.random_range(0..SURFACE_COUNT),
                sector: rng.random_range(0..SECTOR_COUNT),
            })
            .collect();
        Self { requests }
    }

    /// Builds a set from an explicit request list.
    ///
    /// The list must hold exactly 30 in-range requests with ids 1..=30 in
    /// order.
    pub fn from_requests(requests: Vec<Request>) -> SimResult<Self> {
        validate_requests(&requests).map_err(SimError::InvalidRequests)?;
        Ok(Self { requests })
    }

    /// Builds a set from 30 cylinders, assigning ids 1..=30.
    pub fn from_cylinders(cylinders: &[u32]) -> SimResult<Self> {
        let requests = cylinders
            .iter()
            .zip(1u32..)
            .map(|(&cylinder, id)| Request::new(id, cylinder))
            .collect();
        Self::from_requests(requests)
    }

    /// All requests in generation order.
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Requests of a single arrival wave.
    pub fn wave(&self, index: WaveIndex) -> &[Request] {
        &self.requests[index.span()]
    }

    /// Iterates over the waves in release order.
    pub fn waves(&self) -> impl Iterator<Item = &[Request]> {
        self.requests.chunks(WAVE_SIZE)
    }

    /// Looks up a request by id.
    pub fn get(&self, id: u32) -> Option<&Request> {
        id.checked_sub(1)
            .and_then(|idx| self.requests.get(idx as usize))
    }

    /// Number of requests (always 30).
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl Default for RequestSet {
    fn default() -> Self {
        Self::generate(None)
    }
}

/// Requests released but not yet served, unique by id, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingQueue {
    requests: Vec<Request>,
}

impl PendingQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases a batch of requests into the queue.
    ///
    /// Requests whose id is already queued are ignored. Arrival order
    /// (ascending id) is preserved.
    pub fn admit(&mut self, batch: &[Request]) {
        for request in batch {
            if !self.contains(request.id) {
                self.requests.push(*request);
            }
        }
        self.requests.sort_by_key(|r| r.id);
    }

    /// Removes a request by id, returning it if it was queued.
    pub fn remove(&mut self, id: u32) -> Option<Request> {
        let pos = self.requests.iter().position(|r| r.id == id)?;
        Some(self.requests.remove(pos))
    }

    /// Whether a request with this id is queued.
    pub fn contains(&self, id: u32) -> bool {
        self.requests.iter().any(|r| r.id == id)
    }

    /// Queued requests in arrival order.
    pub fn as_slice(&self) -> &[Request] {
        &self.requests
    }

    /// Ids of queued requests in arrival order.
    pub fn ids(&self) -> Vec<u32> {
        self.requests.iter().map(|r| r.id).collect()
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
