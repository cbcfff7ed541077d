pub mod canonical;
pub mod contour;
pub mod faces;
pub mod outer_face;
pub mod rotation;
pub mod shift;
