//! GeoProve CLI
//!
//! Loads a proof document, rebuilds the relation store by replaying every
//! statement in construction order, and prints each statement's narration.
//! With `--verify`, every statement is re-derived from current geometry and
//! failures are reported.

use anyhow::{bail, Context, Result};
use clap::Parser;
use geoprove_core::{
    Conclusion, EntityRef, Fact, ProofSession, Reason, Statement,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geoprove")]
#[command(about = "Replay and verify a plane-geometry proof document")]
struct Args {
    /// Proof document (JSON)
    document: PathBuf,

    /// Re-derive every statement and report stale proofs
    #[arg(long)]
    verify: bool,
}

/// On-disk proof document
///
/// Entity references are indices into the respective lists, in construction
/// order; this matches the id values the session hands out.
#[derive(Debug, Deserialize)]
struct Document {
    points: Vec<PointDoc>,
    #[serde(default)]
    lines: Vec<LineDoc>,
    #[serde(default)]
    circles: Vec<CircleDoc>,
    #[serde(default)]
    on_line: Vec<OnLineDoc>,
    #[serde(default)]
    on_circle: Vec<OnCircleDoc>,
    #[serde(default)]
    angles: Vec<AngleDoc>,
    #[serde(default)]
    lengths: Vec<LengthDoc>,
    #[serde(default)]
    triangles: Vec<[u32; 3]>,
    #[serde(default)]
    quads: Vec<[u32; 4]>,
    #[serde(default)]
    statements: Vec<StatementDoc>,
}

#[derive(Debug, Deserialize)]
struct PointDoc {
    label: String,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct LineDoc {
    p1: u32,
    p2: u32,
}

#[derive(Debug, Deserialize)]
struct CircleDoc {
    center: u32,
    radius: f64,
}

#[derive(Debug, Deserialize)]
struct OnLineDoc {
    point: u32,
    line: u32,
}

#[derive(Debug, Deserialize)]
struct OnCircleDoc {
    point: u32,
    circle: u32,
}

#[derive(Debug, Deserialize)]
struct AngleDoc {
    first: u32,
    vertex: u32,
    second: u32,
    #[serde(default)]
    mark: u32,
}

#[derive(Debug, Deserialize)]
struct LengthDoc {
    p1: u32,
    p2: u32,
    #[serde(default)]
    kind: u32,
    #[serde(default)]
    on_line: Option<u32>,
    #[serde(default)]
    on_circle: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct StatementDoc {
    conclusion: Conclusion,
    #[serde(default)]
    reason: Option<Reason>,
    #[serde(default)]
    auxiliary: Vec<EntityRef>,
}

fn build_session(doc: &Document) -> ProofSession {
    use geoprove_core::{CircleId, LineId, PointId};

    let mut session = ProofSession::new();
    for p in &doc.points {
        session.add_point(p.label.clone(), p.x, p.y);
    }
    for l in &doc.lines {
        session.add_line(PointId(l.p1), PointId(l.p2));
    }
    for c in &doc.circles {
        session.add_circle(PointId(c.center), c.radius);
    }
    for o in &doc.on_line {
        session.put_point_on_line(PointId(o.point), LineId(o.line));
    }
    for o in &doc.on_circle {
        session.put_point_on_circle(PointId(o.point), CircleId(o.circle));
    }
    for a in &doc.angles {
        session.add_angle(
            [PointId(a.first), PointId(a.vertex), PointId(a.second)],
            a.mark,
        );
    }
    for l in &doc.lengths {
        session.add_length(
            PointId(l.p1),
            PointId(l.p2),
            l.kind,
            l.on_line.map(LineId),
            l.on_circle.map(CircleId),
        );
    }
    for t in &doc.triangles {
        session.add_triangle(t.map(PointId));
    }
    for q in &doc.quads {
        session.add_quad(q.map(PointId));
    }
    for s in &doc.statements {
        let statement = match s.reason {
            Some(reason) => Statement::derived(Fact::new(
                s.conclusion.clone(),
                reason,
                s.auxiliary.clone(),
            )),
            None => Statement::asserted(s.conclusion.clone()),
        };
        session.commit(statement);
    }
    session
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let text = std::fs::read_to_string(&args.document)
        .with_context(|| format!("cannot read {}", args.document.display()))?;
    let doc: Document = serde_json::from_str(&text)
        .with_context(|| format!("cannot parse {}", args.document.display()))?;

    let mut session = build_session(&doc);
    session.rebuild();

    if !args.verify {
        for statement in session.statements() {
            match statement.reason {
                Some(reason) => println!(
                    "{} ({reason})",
                    describe(&statement.conclusion, &session)
                ),
                None => println!("{} (asserted)", describe(&statement.conclusion, &session)),
            }
        }
        return Ok(());
    }

    let mut failures = 0;
    let results = session.verify_all();
    for (index, result) in results.iter().enumerate() {
        match result {
            Ok(Some(fact)) => println!("ok: {}", fact.narration(&session.scene)),
            Ok(None) => {
                let conclusion = &session.statements()[index].conclusion;
                println!("ok: {} (asserted)", describe(conclusion, &session));
            }
            Err(err) => {
                failures += 1;
                let conclusion = &session.statements()[index].conclusion;
                eprintln!("failed: {}: {err}", describe(conclusion, &session));
            }
        }
    }
    if failures > 0 {
        bail!("{failures} statement(s) failed verification");
    }
    Ok(())
}

/// Short description of a conclusion that may not have been re-derived
fn describe(conclusion: &Conclusion, session: &ProofSession) -> String {
    match conclusion {
        Conclusion::EqualAngles(a, b) => format!(
            "∠{} = ∠{}",
            session.scene.label(session.scene.angle(*a).vertex),
            session.scene.label(session.scene.angle(*b).vertex)
        ),
        Conclusion::ParallelLines(a, b) => format!("{a} ∥ {b}"),
        Conclusion::PerpendicularLines(a, b) => format!("{a} ⊥ {b}"),
        other => format!("{other:?}"),
    }
}
