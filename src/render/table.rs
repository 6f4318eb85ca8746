use crate::render::{ReportRow, Throughput};
use std::io::{self, Write};

const IMSI_WIDTH: usize = 4;
const VALUE_WIDTH: usize = 32;

/// Printed in place of a value when a direction has no data.
pub const MISSING: &str = "-";

const HEADERS: [&str; 4] = [
    "Avg DL/Rx Throughput(B/s)",
    "Avg DL/Tx Throughput(B/s)",
    "Avg UL/Rx Throughput(B/s)",
    "Avg UL/Tx Throughput(B/s)",
];

/// Write the fixed-width throughput table.
pub fn write_table<W: Write>(rows: &[ReportRow], out: &mut W) -> io::Result<()> {
    write!(out, "{:>w$}", "IMSI", w = IMSI_WIDTH)?;
    for h in HEADERS {
        write!(out, "{:>w$}", h, w = VALUE_WIDTH)?;
    }
    writeln!(out)?;

    for row in rows {
        write!(out, "{:>w$}", row.imsi, w = IMSI_WIDTH)?;
        write_pair(out, row.downlink.as_ref())?;
        write_pair(out, row.uplink.as_ref())?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_pair<W: Write>(out: &mut W, t: Option<&Throughput>) -> io::Result<()> {
    match t {
        Some(t) => write!(
            out,
            "{:>w$.2}{:>w$.2}",
            t.rx,
            t.tx,
            w = VALUE_WIDTH
        ),
        None => write!(out, "{:>w$}{:>w$}", MISSING, MISSING, w = VALUE_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(rows: &[ReportRow]) -> String {
        let mut buf = Vec::new();
        write_table(rows, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_for_no_rows() {
        let out = render(&[]);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("IMSI"));
        assert_eq!(out.trim_end().len(), 4 + 4 * 32);
        assert!(out.trim_end().ends_with("Avg UL/Tx Throughput(B/s)"));
    }

    #[test]
    fn rows_are_fixed_width_with_sentinel() {
        let rows = [
            ReportRow {
                imsi: "1".into(),
                downlink: Some(Throughput {
                    rx: 2000.0,
                    tx: 1000.0,
                }),
                uplink: None,
            },
            ReportRow {
                imsi: "2".into(),
                downlink: None,
                uplink: Some(Throughput { rx: 12.5, tx: 0.0 }),
            },
        ];
        let out = render(&rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);

        let expected_1 = format!(
            "{:>4}{:>32}{:>32}{:>32}{:>32}",
            "1", "2000.00", "1000.00", "-", "-"
        );
        let expected_2 = format!(
            "{:>4}{:>32}{:>32}{:>32}{:>32}",
            "2", "-", "-", "12.50", "0.00"
        );
        assert_eq!(lines[1], expected_1);
        assert_eq!(lines[2], expected_2);
    }

    #[test]
    fn long_imsi_widens_its_field() {
        let rows = [ReportRow {
            imsi: "123456".into(),
            downlink: None,
            uplink: None,
        }];
        let out = render(&rows);
        assert!(out.lines().nth(1).unwrap().starts_with("123456"));
    }
}
