//! Subcommand implementations.

use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use sheetplan_cli::render::{print_analysis, print_corrections, print_profiles};
use sheetplan_core::{AnalyzeOptions, SheetAnalyzer};
use sheetplan_infer::{
    CorrectionLearner, CorrectionStore, JsonCorrectionStore, TagMemory, TagPredictor,
};
use sheetplan_ingest::{
    CsvSheetSource, SheetSource, build_column_profiles, parse_column, suggest_layout,
};
use sheetplan_model::{ItemTag, TagCorrection};

use crate::cli::{AnalyzeArgs, CorrectionsArgs, LearnArgs, ProfileArgs, TagArg};

pub fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let source = CsvSheetSource::new(&args.file);
    let sheet = args
        .sheet
        .clone()
        .unwrap_or_else(|| source.sheet_name().to_string());
    let span = info_span!("analyze", sheet = %sheet, user = %args.user);
    let _guard = span.enter();
    let start = Instant::now();

    let store =
        JsonCorrectionStore::new(&args.corrections_dir).context("open correction store")?;
    let analyzer = SheetAnalyzer::new(source, TagMemory::new(), store);
    let options = resolve_options(args, &analyzer, &sheet)?;
    let analysis = analyzer
        .analyze_sheet_tree(&args.user, &sheet, &options)
        .with_context(|| format!("analyze {}", args.file.display()))?;
    info!(
        groups = analysis.total_groups,
        items = analysis.total_items,
        needs_review = analysis.items_needing_review,
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

pub fn run_profile(args: &ProfileArgs) -> Result<()> {
    let source = CsvSheetSource::new(&args.file);
    let sheet = args
        .sheet
        .clone()
        .unwrap_or_else(|| source.sheet_name().to_string());
    let grid = source
        .read_sheet(&sheet)
        .with_context(|| format!("read {}", args.file.display()))?;
    let profiles = build_column_profiles(&grid, args.max_rows);
    let layout = suggest_layout(&profiles);

    if args.json {
        let payload = serde_json::json!({
            "sheet": sheet,
            "profiles": profiles,
            "suggested_layout": layout,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("Sheet: {sheet}");
        print_profiles(&profiles, layout);
    }
    Ok(())
}

pub fn run_learn(args: &LearnArgs) -> Result<()> {
    let span = info_span!("learn", user = %args.user);
    let _guard = span.enter();

    let store =
        JsonCorrectionStore::new(&args.corrections_dir).context("open correction store")?;
    let learner = CorrectionLearner::new(store);
    let mut predictor = TagPredictor::new(TagMemory::new());
    let replayed = learner
        .hydrate(&args.user, &mut predictor)
        .context("replay stored corrections")?;
    debug!(replayed, "hydrated predictor");

    let predicted = match args.predicted {
        Some(tag) => item_tag(tag),
        None => predictor.predict(&args.term).tag,
    };
    let stored = learner
        .save_correction(
            &args.user,
            &args.term,
            predicted,
            item_tag(args.tag),
            args.source_file.clone(),
            &mut predictor,
        )
        .context("store correction")?;
    println!(
        "learned: {} -> {} (predicted {}, user {})",
        stored.term, stored.corrected, stored.predicted, stored.user
    );
    Ok(())
}

pub fn run_corrections(args: &CorrectionsArgs) -> Result<()> {
    let store =
        JsonCorrectionStore::new(&args.corrections_dir).context("open correction store")?;
    let users = match &args.user {
        Some(user) => vec![user.clone()],
        None => store.users().context("list correction users")?,
    };
    let mut rows: Vec<TagCorrection> = Vec::new();
    for user in users {
        rows.extend(
            store
                .corrections_for(&user)
                .with_context(|| format!("load corrections for {user}"))?,
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("no stored corrections");
        return Ok(());
    }
    print_corrections(&rows);
    Ok(())
}

/// Explicit column flags win; otherwise the column profiles pick the layout.
fn resolve_options<R, S>(
    args: &AnalyzeArgs,
    analyzer: &SheetAnalyzer<R, S>,
    sheet: &str,
) -> Result<AnalyzeOptions>
where
    R: SheetSource,
    S: CorrectionStore,
{
    let explicit = match (args.category_column.as_deref(), args.value_column.as_deref()) {
        (Some(category), Some(value)) => Some((column_index(category)?, column_index(value)?)),
        (None, None) => None,
        _ => bail!("--category-column and --value-column must be given together"),
    };
    let mut options = match explicit {
        Some((category_column, value_column)) => AnalyzeOptions {
            category_column,
            value_column,
            start_row: 0,
        },
        None => {
            let profiles = analyzer.profile_columns(sheet, args.max_rows)?;
            match suggest_layout(&profiles) {
                Some(layout) => {
                    debug!(
                        category = layout.category_column,
                        value = layout.value_column,
                        "detected column layout"
                    );
                    AnalyzeOptions::from(layout)
                }
                None => AnalyzeOptions::default(),
            }
        }
    };
    options.start_row = args.start_row;
    Ok(options)
}

fn column_index(raw: &str) -> Result<usize> {
    parse_column(raw).with_context(|| {
        format!("unrecognized column {raw:?}; use a letter like A or a zero-based index")
    })
}

fn item_tag(tag: TagArg) -> ItemTag {
    match tag {
        TagArg::Budget => ItemTag::Budget,
        TagArg::Recurring => ItemTag::Recurring,
        TagArg::Savings => ItemTag::Savings,
        TagArg::Income => ItemTag::Income,
        TagArg::Debt => ItemTag::Debt,
        TagArg::Unknown => ItemTag::Unknown,
    }
}
