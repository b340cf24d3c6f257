use crate::math::{Point, Transform};
use crate::{FatLine, Vertex};

impl FatLine {
    /// The outline of a sequence of lines as a single closed polygon.
    ///
    /// The polygon goes through the start cap of the first line, the forward edge
    /// of every line, the end cap of the last line, then the backward edge of
    /// every line from the last one to the first one, reversed. Consecutive
    /// duplicate points are removed and the first point is not repeated at the
    /// end.
    ///
    /// Every point is transformed by `transform`, typically from screen space to
    /// object space.
    pub fn outline_as_array(lines: &[FatLine], transform: &Transform) -> Vec<Point> {
        let (first, last) = match (lines.first(), lines.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Vec::new(),
        };

        let capacity = first.start_cap().len()
            + last.end_cap().len()
            + lines
                .iter()
                .map(|line| line.forward_line().len() + line.backward_line().len())
                .sum::<usize>();

        let mut outline = Outline {
            points: Vec::with_capacity(capacity),
            transform,
        };

        outline.extend(first.start_cap());
        for line in lines {
            outline.extend(line.forward_line());
        }
        outline.extend(last.end_cap());
        for line in lines.iter().rev() {
            outline.extend(line.backward_line().iter().rev());
        }

        let mut points = outline.points;
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        points
    }
}

struct Outline<'l> {
    points: Vec<Point>,
    transform: &'l Transform,
}

impl<'l> Outline<'l> {
    fn extend<'v, I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = &'v Vertex>,
    {
        for v in vertices {
            let p = self.transform.transform_point(v.position);
            if self.points.last() != Some(&p) {
                self.points.push(p);
            }
        }
    }
}
