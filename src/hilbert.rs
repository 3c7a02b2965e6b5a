// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Two-dimensional Hilbert curve mapping of the IPv4 address space.
//!
//! Distances are mapped to coordinates with John Skilling's transpose algorithm ("Programming the Hilbert
//! curve", AIP Conf. Proc. 707, 2004). Numerically close addresses end up in nearby cells, so address blocks show
//! up as contiguous areas.

use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::observation::Observations;
use crate::{Error, Result};

pub static MAX_ORDER: u32 = 16;
static DIMENSIONS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HilbertCurve {
    order: u32,
}

impl HilbertCurve {
    pub fn new(order: u32) -> Result<HilbertCurve> {
        if order == 0 || order > MAX_ORDER {
            return Err(Error::ParserError {
                what: order.to_string(),
                to: "HilbertCurve",
                why: format!("order must be between 1 and {}", MAX_ORDER),
            });
        }
        Ok(HilbertCurve { order })
    }

    /// Curve of order 16 covering all 2^32 IPv4 addresses on a 65536 x 65536 grid.
    pub fn ipv4() -> HilbertCurve {
        HilbertCurve { order: MAX_ORDER }
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Number of cells per side.
    pub fn side(&self) -> u64 {
        1 << self.order
    }

    pub fn max_distance(&self) -> u64 {
        (1 << (DIMENSIONS * self.order)) - 1
    }

    /// Maps `distance` along the curve to `(x, y)`; `None` if the distance lies beyond the curve.
    pub fn coordinates(&self, distance: u64) -> Option<(u32, u32)> {
        if distance > self.max_distance() {
            return None;
        }
        let mut x = self.transpose(distance);

        // Gray decode
        let t = x[1] >> 1;
        x[1] ^= x[0];
        x[0] ^= t;

        // Undo excess work
        let z: u32 = 1 << self.order;
        let mut q: u32 = 2;
        while q != z {
            let p = q - 1;
            for i in (0..DIMENSIONS as usize).rev() {
                if x[i] & q != 0 {
                    x[0] ^= p;
                } else {
                    let t = (x[0] ^ x[i]) & p;
                    x[0] ^= t;
                    x[i] ^= t;
                }
            }
            q <<= 1;
        }

        Some((x[0], x[1]))
    }

    /// Distributes the bits of `distance`, most significant first, round robin over the dimensions.
    fn transpose(&self, distance: u64) -> [u32; 2] {
        let bits = DIMENSIONS * self.order;
        let mut x = [0u32; 2];
        for pos in 0..bits {
            let bit = ((distance >> (bits - 1 - pos)) & 1) as u32;
            let dim = (pos % DIMENSIONS) as usize;
            x[dim] = (x[dim] << 1) | bit;
        }
        x
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HilbertPoint {
    pub addr: Ipv4Addr,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// IPv4 addresses placed on the Hilbert curve of order 16.
#[derive(Debug, Clone, Serialize)]
pub struct HilbertMap {
    pub curve: HilbertCurve,
    pub points: Vec<HilbertPoint>,
    /// Addresses that are not IPv4 addresses
    pub skipped: usize,
}

impl HilbertMap {
    pub fn from_addrs<I: IntoIterator<Item = Ipv4Addr>>(addrs: I, skipped: usize) -> HilbertMap {
        let curve = HilbertCurve::ipv4();
        let points: Vec<_> = addrs
            .into_iter()
            .filter_map(|addr| {
                curve
                    .coordinates(u32::from(addr) as u64)
                    .map(|(x, y)| HilbertPoint { addr, x, y })
            })
            .collect();
        debug!("Mapped {} addresses onto Hilbert curve; skipped {}.", points.len(), skipped);

        HilbertMap { curve, points, skipped }
    }

    /// Parses `ips` as IPv4 addresses; IPv6 and malformed addresses are skipped and counted.
    pub fn from_ips<'a, I: IntoIterator<Item = &'a str>>(ips: I) -> HilbertMap {
        let mut skipped = 0;
        let addrs: Vec<_> = ips
            .into_iter()
            .filter_map(|ip| match Ipv4Addr::from_str(ip.trim()) {
                Ok(addr) => Some(addr),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect();

        HilbertMap::from_addrs(addrs, skipped)
    }

    pub fn from_observations(observations: &Observations) -> HilbertMap {
        HilbertMap::from_ips(observations.iter().map(|x| x.ip()))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let init = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        let bounding_box = self.points.iter().fold(init, |acc, p| BoundingBox {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        });

        Some(bounding_box)
    }
}
