// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Seeded toy-instance generation for tests, benches, and the CLI.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tdroute_core::prelude::{TimeDelta, TimeInterval, TimePoint};
use tdroute_model::prelude::{Depot, Instance, InstanceBuilder, InstanceError, NodeId};

const HOUR: f64 = 60.0;
const NODES: usize = 4;
const INTERVALS: usize = 5;
const START: usize = 2;
const END: usize = 0;

/// A small reproducible instance: four nodes, five time slots over a day
/// of ten hours, depot windows spanning the working day, one-hour customer
/// windows opening in the third hour, uniform travel-time samples.
pub fn toy_instance(seed: u64) -> Result<Instance, InstanceError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let depot = Depot::new(NodeId::new(START), NodeId::new(END));

    let mut windows = Vec::with_capacity(NODES);
    for node in 0..NODES {
        if depot.contains(NodeId::new(node)) {
            windows.push(TimeInterval::new(TimePoint::new(0.0), TimePoint::new(8.5 * HOUR)));
        } else {
            let open = rng.random_range(2.0 * HOUR..3.0 * HOUR);
            windows.push(TimeInterval::new(
                TimePoint::new(open),
                TimePoint::new(open + HOUR),
            ));
        }
    }

    // Evenly spaced breakpoints over [-5, 600]; the small negative origin
    // keeps departures right at time zero inside the first slot.
    let span = 10.0 * HOUR + 5.0;
    let breakpoints: Vec<TimePoint<f64>> = (0..=INTERVALS)
        .map(|k| TimePoint::new(-5.0 + span * k as f64 / INTERVALS as f64))
        .collect();

    let mut samples = Vec::with_capacity(NODES * NODES * (INTERVALS + 1));
    for tail in 0..NODES {
        for head in 0..NODES {
            for _ in 0..=INTERVALS {
                if tail == head {
                    samples.push(0.0);
                } else {
                    samples.push(rng.random_range(5.0..20.0));
                }
            }
        }
    }

    InstanceBuilder::new()
        .with_windows(windows)
        .with_breakpoints(breakpoints)
        .with_travel_samples(samples)
        .with_depot(depot)
        .with_service_time(TimeDelta::new(5.0))
        .with_tightness(TimeDelta::new(HOUR))
        .with_regret_weight(5.0)
        .with_start_weight(0.1)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_instance() {
        let a = toy_instance(123).unwrap();
        let b = toy_instance(123).unwrap();
        assert_eq!(a, b);
        let c = toy_instance(124).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_toy_shape() {
        let inst = toy_instance(1).unwrap();
        assert_eq!(inst.nodes(), 4);
        assert_eq!(inst.grid().intervals(), 5);
        assert_eq!(inst.depot().start(), NodeId::new(2));
        assert_eq!(inst.depot().end(), NodeId::new(0));
        for node in inst.customers() {
            let w = inst.window(node);
            assert_eq!((w.end() - w.start()).value(), HOUR);
            assert!(w.start().value() >= 2.0 * HOUR);
            assert!(w.end().value() <= 4.0 * HOUR);
        }
        assert_eq!(inst.grid().horizon().start().value(), -5.0);
        assert_eq!(inst.grid().horizon().end().value(), 600.0);
    }
}
