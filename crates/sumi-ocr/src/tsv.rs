//! Assembly of Tesseract's TSV result table into ordered text lines.
//!
//! Columns: level, page_num, block_num, par_num, line_num, word_num, left,
//! top, width, height, conf, text. Word rows are level 5; structural rows
//! (page/block/paragraph/line) carry conf -1 and no text worth keeping.

/// Group word rows into lines by their (block, paragraph, line) triple,
/// preserving the engine's row order exactly. Confidence and geometry are
/// read only to classify rows, then dropped.
pub fn assemble_lines(tsv: &str) -> Vec<String> {
    const WORD_LEVEL: u32 = 5;

    let mut lines: Vec<((u32, u32, u32), Vec<String>)> = Vec::new();

    for row in tsv.lines() {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 {
            continue;
        }
        // A non-numeric first column is the CLI header row; skip it.
        let Ok(level) = cols[0].parse::<u32>() else {
            continue;
        };
        if level != WORD_LEVEL {
            continue;
        }
        let (Ok(block), Ok(par), Ok(line)) = (
            cols[2].parse::<u32>(),
            cols[3].parse::<u32>(),
            cols[4].parse::<u32>(),
        ) else {
            continue;
        };
        let conf: f32 = cols[10].parse().unwrap_or(-1.0);
        if conf < 0.0 {
            continue;
        }
        let word = cols[11].trim();
        if word.is_empty() {
            continue;
        }

        let key = (block, par, line);
        match lines.last_mut() {
            Some((last_key, words)) if *last_key == key => words.push(word.to_string()),
            _ => lines.push((key, vec![word.to_string()])),
        }
    }

    lines
        .into_iter()
        .map(|(_, words)| words.join(" "))
        .collect()
}
