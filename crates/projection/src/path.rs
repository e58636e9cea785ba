use foundation::Vec2;

/// SVG-style path data for one region outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathData(String);

impl PathData {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PathData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds path data one subpath at a time. Coordinates are rounded to
/// 1/1000 px so identical projections always print identical paths.
#[derive(Debug, Default)]
pub struct PathBuilder {
    out: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.command('M', p);
    }

    pub fn line_to(&mut self, p: Vec2) {
        self.command('L', p);
    }

    pub fn close(&mut self) {
        self.out.push('Z');
    }

    pub fn finish(self) -> PathData {
        PathData(self.out)
    }

    fn command(&mut self, op: char, p: Vec2) {
        self.out.push(op);
        self.out.push_str(&format_coord(p.x));
        self.out.push(',');
        self.out.push_str(&format_coord(p.y));
    }
}

fn format_coord(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    // Avoids the "-0" artifact for tiny negative values.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}
