/// Client-side route paths and their parser
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{all_consuming, map, opt, value},
    sequence::{preceded, terminated},
    IResult,
};
use std::fmt;

use crate::shape::ShapeKind;

/// A view the application can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Viewer(ShapeKind),
    Learn(ShapeKind),
    Progress,
    /// `/geometry/:type` or `/learn/:type` naming a shape outside the catalog
    ShapeNotFound(String),
    NotFound(String),
}

impl Route {
    /// Parse a path like `/geometry/torus`; a single trailing slash is accepted
    pub fn parse(path: &str) -> Route {
        match all_consuming(terminated(route, opt(char('/'))))(path) {
            Ok((_, route)) => route,
            Err(_) => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Viewer(kind) => write!(f, "/geometry/{kind}"),
            Route::Learn(kind) => write!(f, "/learn/{kind}"),
            Route::Progress => write!(f, "/progress"),
            Route::ShapeNotFound(path) | Route::NotFound(path) => write!(f, "{path}"),
        }
    }
}

fn route(input: &str) -> IResult<&str, Route> {
    alt((
        shape_route("/geometry/", Route::Viewer),
        shape_route("/learn/", Route::Learn),
        value(Route::Progress, tag("/progress")),
        value(Route::Home, tag("/")),
    ))(input)
}

fn shape_route(
    prefix: &'static str,
    make: fn(ShapeKind) -> Route,
) -> impl FnMut(&str) -> IResult<&str, Route> {
    move |input: &str| {
        map(preceded(tag(prefix), segment), |name: &str| match name.parse() {
            Ok(kind) => make(kind),
            Err(_) => Route::ShapeNotFound(format!("{prefix}{name}")),
        })(input)
    }
}

fn segment(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '/' && c != '?' && c != '#')(input)
}
