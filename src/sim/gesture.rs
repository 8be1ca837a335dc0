//! Hand gestures from tracked joints
//!
//! Two gestures are recognized. A pinch is the index fingertip touching the
//! thumb tip on the same hand and steers the airplane. A heart is both index
//! fingertips touching and both thumb tips touching, and yields a pose.
//!
//! Contact events come from the host's collision system. It reports the pair
//! in either order and often reports the same touch twice with the order
//! swapped, so `PinchClassifier` drops a pair that reverses the previous one.

use std::fmt;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Fingertips closer than this (meters) count as touching for the heart gesture
pub const HEART_THRESHOLD: f32 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hand::Left => "left",
            Hand::Right => "right",
        }
    }
}

/// Tracked joints used by the gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointName {
    ThumbKnuckle,
    ThumbTip,
    IndexFingerTip,
}

impl JointName {
    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::ThumbKnuckle => "thumb-knuckle",
            JointName::ThumbTip => "thumb-tip",
            JointName::IndexFingerTip => "index-finger-tip",
        }
    }
}

/// One joint on one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Joint {
    pub hand: Hand,
    pub name: JointName,
}

impl Joint {
    pub const fn new(hand: Hand, name: JointName) -> Self {
        Self { hand, name }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.hand.as_str(), self.name.as_str())
    }
}

/// Which hand pinched, if the pair is an index-tip/thumb-tip pinch
pub fn pinch_hand(a: Joint, b: Joint) -> Option<Hand> {
    if a.hand != b.hand {
        return None;
    }
    match (a.name, b.name) {
        (JointName::IndexFingerTip, JointName::ThumbTip)
        | (JointName::ThumbTip, JointName::IndexFingerTip) => Some(a.hand),
        _ => None,
    }
}

/// Turns a stream of joint contacts into pinches
#[derive(Debug, Clone, Default)]
pub struct PinchClassifier {
    last: Option<(Joint, Joint)>,
}

impl PinchClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a contact between `a` and `b`.
    ///
    /// Returns `None` for non-pinch pairs and for the reverse of the
    /// previous contact. A suppressed contact does not replace the previous one.
    pub fn contact(&mut self, a: Joint, b: Joint) -> Option<Hand> {
        if self.last == Some((b, a)) {
            log::trace!("Dropping reversed contact {} / {}", a, b);
            return None;
        }
        self.last = Some((a, b));
        pinch_hand(a, b)
    }

    /// Forget the previous contact
    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// World positions of the joints the heart gesture needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandJoints {
    pub left_thumb_knuckle: Vec3,
    pub left_thumb_tip: Vec3,
    pub left_index_tip: Vec3,
    pub right_thumb_knuckle: Vec3,
    pub right_thumb_tip: Vec3,
    pub right_index_tip: Vec3,
}

/// Detect the two-handed heart gesture.
///
/// Returns the gesture center and its orientation as column axes: X runs
/// from the left thumb knuckle to the right one, Y from the right thumb tip
/// to the right index tip, Z is their cross product. Each distance must be
/// strictly below `HEART_THRESHOLD`.
pub fn detect_heart(joints: &HandJoints) -> Option<(Vec3, Mat3)> {
    let index_distance = joints.left_index_tip.distance(joints.right_index_tip);
    let thumb_distance = joints.left_thumb_tip.distance(joints.right_thumb_tip);
    if index_distance >= HEART_THRESHOLD || thumb_distance >= HEART_THRESHOLD {
        return None;
    }

    let center = (joints.right_index_tip + joints.left_thumb_tip) * 0.5;

    let x = (joints.right_thumb_knuckle - joints.left_thumb_knuckle).try_normalize()?;
    let y = (joints.right_index_tip - joints.right_thumb_tip).try_normalize()?;
    let z = x.cross(y).try_normalize()?;

    Some((center, Mat3::from_cols(x, y, z)))
}
