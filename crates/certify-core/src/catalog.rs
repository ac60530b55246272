//! Predefined choices offered by the certificate form.
//! Free-text values are still accepted when issuing.

pub const CERTIFICATE_TYPES: [&str; 5] = [
    "Internship",
    "Course Completion",
    "Workshop",
    "Training Program",
    "Seminar",
];

pub const DOMAINS: [&str; 10] = [
    "Web Development",
    "Data Science",
    "Digital Marketing",
    "AI/ML",
    "Graphic Design",
    "Content Writing",
    "Mobile Development",
    "Cyber Security",
    "Cloud Computing",
    "UI/UX Design",
];

pub fn is_known_certificate_type(value: &str) -> bool {
    CERTIFICATE_TYPES.contains(&value)
}

pub fn is_known_domain(value: &str) -> bool {
    DOMAINS.contains(&value)
}
