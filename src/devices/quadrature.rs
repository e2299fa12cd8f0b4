/*
*  Quadrature Decoder
*
*  Edge table, new level of the edge channel vs. last seen level of the other
*
*      A edge            B edge
*      A  B  delta       B  A  delta
*      1  0   +1         1  0   -1
*      1  1   -1         1  1   +1
*      0  0   -1         0  0   +1
*      0  1   +1         0  1   -1
*
*  Forward rotation walks (A,B) through 00 -> 10 -> 11 -> 01 -> 00.
*/

use core::cell::Cell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderChannel {
    A,
    B,
}

/// Count change for one edge.
///
/// Depends only on which channel fired, its new level and the other
/// channel's last known level. The other channel is never re-sampled.
pub const fn edge_delta(channel: EncoderChannel, new_level: bool, other_level: bool) -> i32 {
    let same = new_level == other_level;
    match channel {
        EncoderChannel::A => if same { -1 } else { 1 },
        EncoderChannel::B => if same { 1 } else { -1 },
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct DecoderState {
    level_a: bool,
    level_b: bool,
    ticks: i32,
}

/// Signed tick counter fed from the two encoder edge handlers.
///
/// The counter is an `i32`: at 4480 ticks per wheel revolution that is about
/// 479 000 revolutions in one direction before it wraps. Arithmetic wraps and
/// the velocity probe takes a wrapping difference, so a wrap still yields the
/// right delta. Cortex-M0+ has no atomic read-modify-write, so every access
/// takes a short critical section.
pub struct QuadratureDecoder {
    state: Mutex<CriticalSectionRawMutex, Cell<DecoderState>>,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(DecoderState {
                level_a: false,
                level_b: false,
                ticks: 0,
            })),
        }
    }

    /// Seed the last known channel levels, sampled from the pins at start-up.
    pub fn set_levels(&self, level_a: bool, level_b: bool) {
        self.state.lock(|state| {
            let mut s = state.get();
            s.level_a = level_a;
            s.level_b = level_b;
            state.set(s);
        });
    }

    pub fn on_edge_a(&self, level: bool) {
        self.on_edge(EncoderChannel::A, level);
    }

    pub fn on_edge_b(&self, level: bool) {
        self.on_edge(EncoderChannel::B, level);
    }

    pub fn on_edge(&self, channel: EncoderChannel, level: bool) {
        self.state.lock(|state| {
            let mut s = state.get();
            let delta = match channel {
                EncoderChannel::A => {
                    s.level_a = level;
                    edge_delta(channel, level, s.level_b)
                },
                EncoderChannel::B => {
                    s.level_b = level;
                    edge_delta(channel, level, s.level_a)
                },
            };
            debug_assert!(s.ticks.checked_add(delta).is_some(), "encoder tick counter wrapped");
            s.ticks = s.ticks.wrapping_add(delta);
            state.set(s);
        });
    }

    pub fn ticks(&self) -> i32 {
        self.state.lock(|state| state.get().ticks)
    }

    pub fn reset(&self) {
        self.state.lock(|state| {
            let mut s = state.get();
            s.ticks = 0;
            state.set(s);
        });
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}
