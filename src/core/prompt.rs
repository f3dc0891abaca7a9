use crate::domain::model::DrawingFormat;

const DXF_INSTRUCTIONS: &str = "Generate DXF code for a 2D technical drawing.

Requirements:
- Use proper DXF syntax
- Include HEADER, TABLES, and ENTITIES sections
- Use LAYER 0 for all entities
- All dimensions in millimeters
- Include lines, circles, and arcs as needed

Return ONLY the DXF code, no markdown formatting.";

const SVG_INSTRUCTIONS: &str = "Generate SVG code for a 2D graphic.

Requirements:
- Proper SVG syntax with viewBox
- Clean, well-structured code
- Use <g> groups for organization
- Add id attributes to elements
- Parametric where possible

Return ONLY the SVG code, no markdown formatting.";

pub const DESCRIPTION_SEPARATOR: &str = "\n\nDescription: ";

pub struct PromptComposer;

impl PromptComposer {
    pub fn instructions(format: DrawingFormat) -> &'static str {
        match format {
            DrawingFormat::Dxf => DXF_INSTRUCTIONS,
            DrawingFormat::Svg => SVG_INSTRUCTIONS,
        }
    }

    /// Template followed by the description, verbatim. Blank input is the caller's problem.
    pub fn compose(description: &str, format: DrawingFormat) -> String {
        let instructions = Self::instructions(format);
        let mut prompt =
            String::with_capacity(instructions.len() + DESCRIPTION_SEPARATOR.len() + description.len());
        prompt.push_str(instructions);
        prompt.push_str(DESCRIPTION_SEPARATOR);
        prompt.push_str(description);
        prompt
    }
}
