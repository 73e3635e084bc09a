use crate::types::Project;

/// Parse the minimum-stars text box.
///
/// Reads the leading integer, ignoring whatever follows it ("12abc" is 12,
/// "3.7" is 3). Text that does not start with a number counts as 0.
pub fn parse_min_stars(input: &str) -> i64 {
    let text = input.trim_start();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value = unsigned[..end].bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });
    if negative {
        -value
    } else {
        value
    }
}

/// Does `project` pass the star threshold and the (already lowercased) search term?
pub fn matches(project: &Project, search_lower: &str, min_stars: i64) -> bool {
    let meets_stars = i128::from(project.stargazers_count) >= i128::from(min_stars);
    if !meets_stars {
        return false;
    }
    if search_lower.is_empty() {
        return true;
    }
    project.display_name().to_lowercase().contains(search_lower)
        || project
            .description
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(search_lower)
}

/// Stable subset of `projects` matching the search term and star threshold.
pub fn filter(projects: &[Project], search_term: &str, min_stars: i64) -> Vec<Project> {
    let search_lower = search_term.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| matches(p, &search_lower, min_stars))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: u64, full_name: &str, description: Option<&str>, stars: u64) -> Project {
        Project {
            id,
            name: full_name.rsplit('/').next().unwrap_or(full_name).to_string(),
            full_name: Some(full_name.to_string()),
            description: description.map(str::to_string),
            stargazers_count: stars,
            ..Default::default()
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project(1, "rust-lang/rust", Some("Empowering everyone"), 90_000),
            project(2, "octo/Tail", None, 25),
            project(3, "acme/widgets", Some("Rusty widgets"), 5),
            project(4, "acme/gadgets", Some("Nothing to see"), 40),
        ]
    }

    fn ids(projects: &[Project]) -> Vec<u64> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn min_stars_parsing() {
        assert_eq!(parse_min_stars("20"), 20);
        assert_eq!(parse_min_stars(" 7 "), 7);
        assert_eq!(parse_min_stars(""), 0);
        assert_eq!(parse_min_stars("abc"), 0);
        assert_eq!(parse_min_stars("-3"), -3);
    }

    #[test]
    fn min_stars_reads_leading_integer() {
        assert_eq!(parse_min_stars("12abc"), 12);
        assert_eq!(parse_min_stars("3.7"), 3);
        assert_eq!(parse_min_stars("+8 stars"), 8);
        assert_eq!(parse_min_stars("-"), 0);
        assert_eq!(parse_min_stars("stars 12"), 0);
        assert_eq!(parse_min_stars("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn empty_search_only_applies_stars() {
        assert_eq!(ids(&filter(&sample(), "", 20)), vec![1, 2, 4]);
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        assert_eq!(ids(&filter(&sample(), "RUST", 0)), vec![1, 3]);
        assert_eq!(ids(&filter(&sample(), "tail", 0)), vec![2]);
    }

    #[test]
    fn falls_back_to_name_without_full_name() {
        let mut p = project(9, "x/only-name", None, 1);
        p.full_name = None;
        assert_eq!(ids(&filter(&[p], "only", 0)), vec![9]);
    }

    #[test]
    fn unparsable_threshold_shows_everything_matching_search() {
        let threshold = parse_min_stars("abc");
        assert_eq!(ids(&filter(&sample(), "", threshold)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn negative_threshold_is_not_clamped() {
        assert_eq!(filter(&sample(), "", -100).len(), 4);
    }

    #[test]
    fn output_is_a_stable_subset() {
        let input = sample();
        for (term, stars) in [("", 0), ("a", 10), ("widgets", 0), ("zzz", 0), ("e", 30)] {
            let out = filter(&input, term, stars);
            let lower = term.to_lowercase();
            assert!(out.iter().all(|p| matches(p, &lower, stars)));
            let expected: Vec<u64> = input
                .iter()
                .filter(|p| matches(p, &lower, stars))
                .map(|p| p.id)
                .collect();
            assert_eq!(ids(&out), expected);
            assert_eq!(out, filter(&input, term, stars));
        }
    }
}
