mod face_counts;

pub use face_counts::FaceCounts;
