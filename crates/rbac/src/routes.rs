//! Route table
//!
//! Every screen the client knows, split into public routes (for anonymous
//! visitors) and protected routes (for signed-in users). Patterns use
//! `:name` segments for parameters.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Which guard a route sits behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Public,
    Protected,
}

/// A route pattern and the screen it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDef {
    pub pattern: &'static str,
    pub kind: RouteKind,
    pub title: &'static str,
}

const fn public(pattern: &'static str, title: &'static str) -> RouteDef {
    RouteDef { pattern, kind: RouteKind::Public, title }
}

const fn protected(pattern: &'static str, title: &'static str) -> RouteDef {
    RouteDef { pattern, kind: RouteKind::Protected, title }
}

pub const ROUTES: &[RouteDef] = &[
    public("/", "Landing"),
    public("/admissions", "Programmes"),
    public("/admissions/brochure/:classId", "Course Brochure"),
    public("/apply", "Admission Form"),
    public("/login", "Login"),
    public("/track-application", "Track Application"),
    public("/face-login", "Face Login"),
    protected("/profile", "Profile"),
    protected("/user-management", "User Management"),
    protected("/staff-list", "Staff List"),
    protected("/view-teachers", "Teachers"),
    protected("/view-students", "Students"),
    protected("/my-courses", "My Courses"),
    protected("/time-table", "Time Table"),
    protected("/course-details/:classId/:subjectId", "Course Details"),
    protected("/manage-timetables", "Manage Timetables"),
    protected("/my-attendance", "My Attendance"),
    protected("/take-attendance/:slotId/:classId", "Take Attendance"),
    protected("/manage-admissions", "Manage Admissions"),
    protected("/manage-subjects", "Manage Subjects"),
    protected("/manage-classes", "Manage Classes"),
    protected("/manage-classrooms", "Manage Classrooms"),
    protected("/student-progression", "Student Progression"),
    protected("/class-designer", "Curriculum Designer"),
    protected("/mentor-assignment", "Mentor Assignment"),
    protected("/manage-hostel", "Manage Hostel"),
    protected("/hostel", "Hostel"),
    protected("/hostel-brochure", "Hostel Brochure"),
    protected("/manage-rooms", "Manage Rooms"),
    protected("/hostel-residents", "Hostel Residents"),
    protected("/upload-marks", "Upload Marks"),
    protected("/admin-dashboard", "Dashboard"),
    protected("/my-result", "My Result"),
    protected("/risk-dashboard", "Risk Dashboard"),
    protected("/payment-history", "Payment History"),
    protected("/fee-payment", "Fee Payment"),
];

/// A path resolved against the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub route: RouteDef,
    /// Normalised path that matched
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn kind(&self) -> RouteKind {
        self.route.kind
    }

    pub fn pattern(&self) -> &'static str {
        self.route.pattern
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Turn `/course-details/:classId/:subjectId` into an anchored regex with
/// one named group per parameter
fn pattern_regex(pattern: &str) -> Option<Regex> {
    let body: Vec<String> = pattern
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("(?P<{}>[^/]+)", name),
            None => regex::escape(segment),
        })
        .collect();
    Regex::new(&format!("^/{}$", body.join("/"))).ok()
}

fn compiled() -> &'static [(RouteDef, Regex)] {
    static TABLE: OnceLock<Vec<(RouteDef, Regex)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        ROUTES
            .iter()
            .filter_map(|route| pattern_regex(route.pattern).map(|re| (*route, re)))
            .collect()
    })
}

/// Drop query string and fragment, collapse repeated and trailing slashes
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Resolve `path`; `None` when no route matches
pub fn match_route(path: &str) -> Option<RouteMatch> {
    let path = normalize_path(path);
    compiled().iter().find_map(|(route, re)| {
        let captures = re.captures(&path)?;
        let params = re
            .capture_names()
            .flatten()
            .filter_map(|name| captures.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
            .collect();
        Some(RouteMatch {
            route: *route,
            path: path.clone(),
            params,
        })
    })
}

pub fn routes_of(kind: RouteKind) -> impl Iterator<Item = &'static RouteDef> {
    ROUTES.iter().filter(move |r| r.kind == kind)
}
