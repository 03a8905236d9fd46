use calamine::Data;

/// Render a scanned cell the way it reads in the sheet; absent cells come
/// back as the empty string. Whole floats drop the trailing `.0` so numeric
/// SKU and price cells keep their spreadsheet form.
pub(crate) fn data_to_string(cell: Option<&Data>) -> String {
    match cell {
        None => String::new(),
        Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.clone(),
        Some(Data::Float(n)) => {
            if n.fract() == 0.0 {
                format!("{:.0}", n)
            } else {
                n.to_string()
            }
        }
        Some(Data::Int(n)) => n.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        Some(Data::Error(e)) => format!("{e:?}"),
        Some(Data::DateTime(f)) => f.to_string(),
        Some(other) => format!("{other:?}"),
    }
}

fn column_name(mut column: u32) -> String {
    // 1 -> A, 26 -> Z, 27 -> AA ...
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

/// 1-based (column, row) to an A1 reference.
pub(crate) fn cell_ref(col: u32, row: u32) -> String {
    format!("{}{}", column_name(col), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_roll_over_like_excel() {
        assert_eq!(cell_ref(1, 1), "A1");
        assert_eq!(cell_ref(26, 3), "Z3");
        assert_eq!(cell_ref(27, 2), "AA2");
        assert_eq!(cell_ref(52, 10), "AZ10");
        assert_eq!(cell_ref(53, 1), "BA1");
        assert_eq!(cell_ref(702, 7), "ZZ7");
        assert_eq!(cell_ref(703, 7), "AAA7");
    }

    #[test]
    fn whole_floats_lose_the_decimal_point() {
        assert_eq!(data_to_string(Some(&Data::Float(10.0))), "10");
        assert_eq!(data_to_string(Some(&Data::Float(19.9))), "19.9");
        assert_eq!(data_to_string(Some(&Data::Int(7))), "7");
    }

    #[test]
    fn absent_and_empty_cells_read_as_empty() {
        assert_eq!(data_to_string(None), "");
        assert_eq!(data_to_string(Some(&Data::Empty)), "");
        assert_eq!(data_to_string(Some(&Data::String(String::new()))), "");
    }
}
