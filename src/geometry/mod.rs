pub mod angle;
pub mod kernel;

pub use angle::{AngleSampler, random_angle_in_range};
pub use kernel::{
    PixelPoint, centroid, centroid_px, deg_to_rad, distance, line_intersection,
    point_inside_circle, polar_angle_deg, rad_to_deg, walk_along_bearing, x_component,
    y_component,
};
