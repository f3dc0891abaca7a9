use crate::domain::model::DrawingFormat;

/// A ready-made description offered next to the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub format: DrawingFormat,
    pub description: &'static str,
}

const PRESETS: &[Preset] = &[
    Preset {
        slug: "floor-plan",
        title: "Floor Plan",
        summary: "10x8m room with windows and door",
        format: DrawingFormat::Dxf,
        description: "Create a floor plan for 10x8 meter room with:\n- 2 windows (1.5m wide) on north wall\n- 1 door (0.9m wide) on east wall\n- Kitchen counter (3m) on west wall\n- All dimensions in millimeters",
    },
    Preset {
        slug: "circuit-diagram",
        title: "Circuit Diagram",
        summary: "LED flasher with 555 timer",
        format: DrawingFormat::Dxf,
        description: "Create circuit schematic for LED flasher:\n- 555 timer IC\n- LED with current limiting resistor\n- Timing capacitors and resistors\n- Power supply connections",
    },
    Preset {
        slug: "mechanical-part",
        title: "Mechanical Part",
        summary: "Bracket with mounting holes",
        format: DrawingFormat::Dxf,
        description: "2D technical drawing of L-bracket:\n- 100x80mm outer dimensions\n- 5mm material thickness\n- 4 M8 mounting holes (10mm from edges)\n- All dimensions labeled",
    },
    Preset {
        slug: "cnc-toolpath",
        title: "CNC Toolpath",
        summary: "Cutting pattern for laser",
        format: DrawingFormat::Dxf,
        description: "Create laser cutting pattern:\n- 200x100mm rectangular frame\n- 10mm mounting tabs on sides\n- Decorative cutouts in corners\n- Tool compensation included",
    },
    Preset {
        slug: "logo-design",
        title: "Logo Design",
        summary: "Gear and wrench logo",
        format: DrawingFormat::Svg,
        description: "Design a logo:\n- Circular gear shape (20 teeth)\n- Wrench crossed through center\n- Company name 'TechCo' below\n- Professional style, 200x200 viewBox",
    },
    Preset {
        slug: "icon",
        title: "Icon",
        summary: "Settings icon",
        format: DrawingFormat::Svg,
        description: "Create settings icon:\n- Two interlocking gears\n- 48x48px viewBox\n- Single color (black)\n- Clean, simple design",
    },
    Preset {
        slug: "flowchart",
        title: "Flowchart",
        summary: "Process diagram",
        format: DrawingFormat::Svg,
        description: "Create flowchart:\n- 4 process steps (rectangles)\n- Decision diamond in middle\n- Arrows connecting steps\n- Labels on each element",
    },
    Preset {
        slug: "technical-illustration",
        title: "Technical Illustration",
        summary: "Exploded view",
        format: DrawingFormat::Svg,
        description: "Create exploded view diagram:\n- 3 stacked components\n- Offset vertically\n- Alignment lines\n- Labels for each part",
    },
];

pub fn presets(format: DrawingFormat) -> impl Iterator<Item = &'static Preset> {
    PRESETS.iter().filter(move |p| p.format == format)
}

pub fn find(format: DrawingFormat, slug: &str) -> Option<&'static Preset> {
    presets(format).find(|p| p.slug == slug)
}
