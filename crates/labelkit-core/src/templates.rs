//! Built-in starter texts offered when creating prompt templates and specs.

/// Starter prompt template for binary image inspection.
///
/// Contains both placeholder tokens understood by [`crate::prompt::compile`].
pub const STARTER_PROMPT_TEMPLATE: &str = r#"You are an image classifier working on a visual quality inspection line. Classify the attached image according to the inspection specification below and explain your decision.

Inspection specification:
<inspection_spec>
{{INSPECTION_SPEC}}
</inspection_spec>

Look closely at the image and check every requirement of the specification against what you can see. Only reason about visible evidence.

The classification must be exactly one of: {{LABELS}}.

Answer in this format:
<classification>[one of the allowed labels]</classification>
<explanation>[which requirements passed or failed and the visual evidence for each]</explanation>"#;

/// Starter inspection specification for machined metal nuts.
pub const STARTER_INSPECTION_SPEC: &str = "Metal nut visual inspection
1. Geometry: outer diameter, inner diameter and thickness are within drawing tolerances. No warping or deformation.
2. Surface:
2.1. Scratches: none wider than 0.5 mm or longer than 5 mm. No scratch may compromise structural integrity.
2.2. Dents: none deeper than 0.3 mm and none on functional surfaces.
2.3. Burrs: no sharp or excessive burrs.
2.4. Corrosion: no rust, oxidation or discoloration.
3. Threads: internal threads are complete and undamaged, with no cross-threading.
4. Cleanliness: no oil, grease, dirt or other contamination.
5. Machining marks: light tool marks are acceptable if they do not affect use.
6. Edges: smooth and finished, no protrusions.
7. Verdict: a nut that violates any requirement above is defective.";
