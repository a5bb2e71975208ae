//! Unit field: fixed-size set of glowing activation points.

use std::f32::consts::TAU;

use super::Unit;

/// Radius of the default ring layout in centered, height-normalized units.
pub const RING_RADIUS: f32 = 0.45;

/// Per-tick decay applied to units that did not fire.
const ACTIVATION_DECAY: f32 = 0.95;

/// One neuron's state as reported by the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeuronReading {
    pub firing: bool,
    pub potential: f32,
}

/// Ordered, fixed-length unit records for a session.
#[derive(Debug, Clone, Default)]
pub struct UnitField {
    units: Vec<Unit>,
}

impl UnitField {
    pub fn from_units(units: Vec<Unit>) -> Self {
        Self { units }
    }

    /// Lay `count` inactive units evenly around a circle.
    pub fn ring(count: usize, radius: f32) -> Self {
        let units = (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                Unit::new([cos * radius, sin * radius], 0.0)
            })
            .collect();
        Self { units }
    }

    /// Fold one simulation tick into the activations.
    ///
    /// Firing units jump to full activation; the rest decay toward their
    /// current potential. Readings past the end of the field are ignored.
    pub fn update(&mut self, readings: &[NeuronReading]) {
        for (unit, reading) in self.units.iter_mut().zip(readings) {
            unit.activation = if reading.firing {
                1.0
            } else {
                (unit.activation * ACTIVATION_DECAY).max(reading.potential)
            };
        }
    }

    pub fn set_activation(&mut self, index: usize, activation: f32) {
        if let Some(unit) = self.units.get_mut(index) {
            unit.activation = activation;
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
