//! Face-mesh landmark index sets
//!
//! Indices follow the MediaPipe face-mesh anatomical numbering. The 6-point
//! ratio models order points as: outer corner, two upper points, inner corner,
//! two lower points (eyes) and top centers, corners, bottom centers (mouth).

/// Left eye 6-point model for the openness ratio
pub const LEFT_EYE_RATIO_POINTS: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Right eye 6-point model for the openness ratio
pub const RIGHT_EYE_RATIO_POINTS: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Mouth 6-point model: top lip centers, mouth corners, bottom lip centers
pub const MOUTH_RATIO_POINTS: [usize; 6] = [13, 14, 78, 308, 18, 175];

/// Full left eye contour, for display collaborators
pub const LEFT_EYE_CONTOUR: [usize; 16] = [
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
];

/// Full right eye contour, for display collaborators
pub const RIGHT_EYE_CONTOUR: [usize; 16] = [
    362, 382, 381, 380, 374, 373, 390, 249, 263, 466, 388, 387, 386, 385, 384, 398,
];

/// Outer and inner lip contour, for display collaborators
pub const MOUTH_CONTOUR: [usize; 24] = [
    61, 84, 17, 314, 405, 320, 307, 375, 321, 308, 324, 318, 78, 95, 88, 178, 87, 14, 317, 402,
    318, 324, 308, 415,
];
