pub mod formatter;

pub use formatter::{
    format_group_detail, format_group_list, format_impact, format_json, format_score,
    format_scored_table, format_tsv, rank_records, should_use_colors, write_csv, write_csv_to,
    SortKey,
};
