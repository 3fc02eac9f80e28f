use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use glam::DVec2;

use empty_circle::geometry::{Circle, LineSegment};
use empty_circle::{ConvexHull, Delaunay, LargestEmptyCircle, Voronoi};

/// Compute the largest empty circle of a planar point set, along with its
/// Delaunay triangulation, Voronoi diagram and convex hull.
#[derive(Parser, Debug)]
#[command(name = "empty-circle", version, about)]
struct Cli {
    /// Input file with one `x,y` point per line.
    input: PathBuf,

    /// Layers to print in addition to the summary.
    #[arg(value_enum)]
    layers: Vec<Layer>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
    #[value(name = "delaunay")]
    Delaunay,
    #[value(name = "voronoi")]
    Voronoi,
    #[value(name = "convex_hull")]
    ConvexHull,
    #[value(name = "circle")]
    Circle,
    #[value(name = "all_circles")]
    AllCircles,
}

/// Parse `x,y` lines. Blank lines are skipped; parsing stops silently at the
/// first malformed line.
fn read_points(text: &str) -> Vec<DVec2> {
    let mut points = vec![];
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((x, y)) = line.split_once(',') else {
            break;
        };
        match (x.trim().parse::<f64>(), y.trim().parse::<f64>()) {
            (Ok(x), Ok(y)) => points.push(DVec2::new(x, y)),
            _ => break,
        }
    }
    points
}

fn print_segments(name: &str, segments: &[LineSegment]) {
    println!("{} ({} edges):", name, segments.len());
    for segment in segments {
        println!(
            "  ({},{}) -> ({},{})",
            segment.start.x, segment.start.y, segment.end.x, segment.end.y
        );
    }
}

fn print_circle(circle: &Circle) {
    println!(
        "  center ({},{}) radius {}",
        circle.center.x, circle.center.y, circle.radius
    );
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let text = match fs::read_to_string(&cli.input) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}: {}", cli.input.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let points = read_points(&text);

    let delaunay = match Delaunay::build(&points) {
        Ok(delaunay) => delaunay,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let voronoi = Voronoi::build(&delaunay);
    let hull = ConvexHull::new(&delaunay);
    let lec = LargestEmptyCircle::new(&delaunay, &voronoi);

    println!("{} points read from {}", points.len(), cli.input.display());

    for layer in &cli.layers {
        match layer {
            Layer::Delaunay => print_segments("delaunay", &delaunay.edges()),
            Layer::Voronoi => print_segments("voronoi", &voronoi.edges()),
            Layer::ConvexHull => print_segments("convex_hull", hull.edges()),
            Layer::Circle => {
                println!("largest empty circle:");
                if let Some(circle) = lec.largest() {
                    print_circle(&circle);
                }
            }
            Layer::AllCircles => {
                println!("candidate circles ({}):", lec.candidates().len());
                for circle in lec.candidates() {
                    print_circle(circle);
                }
            }
        }
    }

    if cli.layers.is_empty() {
        if let Some(circle) = lec.largest() {
            println!("largest empty circle:");
            print_circle(&circle);
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_read_points() {
        let points = read_points("1,2\n 3.5 , -4 \n\n5,6\n");
        assert_eq!(points, vec![
            DVec2::new(1., 2.),
            DVec2::new(3.5, -4.),
            DVec2::new(5., 6.),
        ]);
    }

    #[test]
    fn test_read_points_stops_at_garbage() {
        let points = read_points("1,2\nnot a point\n3,4\n");
        assert_eq!(points, vec![DVec2::new(1., 2.)]);
        assert!(read_points("").is_empty());
    }
}
