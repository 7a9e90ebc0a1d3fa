use grader_common::{FormState, GradingRecord};

pub const HELP: &str = "\
Procedure information:
  name <text>                    medical student name
  date <YYYY-MM-DD> | date today
  procedure <GJ|PJ|HJ>
  grader <text>                  grader name
Entries:
  entry <n> time <HH:MM:SS|clear>
  entry <n> comment <text>
  entry <n> metric \"<metric>\" | entry <n> metric none
  entry <n> remarks <text>
  add-entry                      add another entry slot
Summary:
  total-time <HH:MM:SS|clear>
  errors <n>
  score \"<metric>\" <1-5>
Actions:
  save                           save the form as a record
  export                         write the newest record as CSV
  preview                        print the CSV without writing it
  show | records [--json] | help
Text may be quoted (\"...\", with \\\" and \\n escapes) or the rest of the line.";

pub fn format_form(form: &FormState) -> String {
    let mut output = format!(
        "Name: {}\nDate: {}\nProcedure: {}\nGrader: {}",
        display_or_dash(&form.name),
        form.date.format("%Y-%m-%d"),
        form.procedure,
        display_or_dash(&form.grader),
    );

    output.push_str(&format!("\n\nEntries ({}):", form.entry_count()));
    for (idx, slot) in form.entries().iter().enumerate() {
        let entry = slot.to_entry();
        let blank = entry.timestamp.is_empty()
            && entry.comment.trim().is_empty()
            && entry.remarks.trim().is_empty()
            && entry.osats_metric.is_none();
        if blank {
            continue;
        }
        output.push_str(&format!(
            "\n  [{}] {} | {} | {} | {}",
            idx + 1,
            display_or_dash(&entry.timestamp),
            display_or_dash(&entry.comment),
            display_or_dash(entry.metric_label()),
            display_or_dash(&entry.remarks),
        ));
    }

    output.push_str(&format!(
        "\n\nTotal Procedure Time: {}\nTotal Errors: {}\n\nOSATS Scores:",
        display_or_dash(&form.total_time.timestamp()),
        form.total_errors,
    ));
    for (metric, score) in form.scores().iter() {
        output.push_str(&format!("\n  {}: {}", metric, score));
    }

    output
}

pub fn format_records(records: &[GradingRecord]) -> String {
    if records.is_empty() {
        return "No saved records".into();
    }

    let mut output = format!("Saved records ({}):", records.len());
    for (idx, record) in records.iter().enumerate() {
        output.push_str(&format!(
            "\n  {}. {} | {} | {} | {}",
            idx + 1,
            record.name(),
            record.date(),
            record.procedure(),
            record.grader(),
        ));
    }
    output
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}
