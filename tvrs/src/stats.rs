use crate::catalog::Catalog;
use crate::error::Result;
use crate::record::RawShow;
use log::info;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

pub type GenreSet = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl FromStr for Order {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub name: String,
    pub rating: f64,
}

/// Mean rating per genre, in the order genres were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreAverages {
    entries: Vec<(String, f64)>,
}

impl GenreAverages {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(genre, avg)| (genre.as_str(), *avg))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn collect_genres(shows: &[RawShow]) -> GenreSet {
    shows
        .iter()
        .flat_map(|show| show.genres())
        .map(String::from)
        .collect()
}

pub fn retain_rated(mut shows: Vec<RawShow>) -> Vec<RawShow> {
    shows.retain(|show| show.rating().is_some());
    shows
}

/// Sort rated shows by rating and keep those carrying `genre`, if given.
/// Shows with equal ratings stay in listing order.
pub fn rank(mut shows: Vec<RawShow>, order: Order, genre: Option<&str>) -> Vec<RankedEntry> {
    let key = |show: &RawShow| show.rating().unwrap_or(f64::NAN);
    shows.sort_by(|a, b| {
        let ord = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match order {
            Order::Asc => ord,
            Order::Desc => ord.reverse(),
        }
    });

    shows
        .iter()
        .filter(|show| genre.map_or(true, |g| show.has_genre(g)))
        .filter_map(|show| {
            Some(RankedEntry {
                name: show.name().to_string(),
                rating: show.rating()?,
            })
        })
        .collect()
}

pub fn average_by_genre(shows: &[RawShow]) -> GenreAverages {
    let mut index: HashMap<&str, usize> = HashMap::new();
    // (genre, sum, count)
    let mut totals: Vec<(&str, f64, u32)> = Vec::new();

    for show in shows {
        let Some(rating) = show.rating() else {
            continue;
        };
        for genre in show.genres() {
            let idx = *index.entry(genre).or_insert_with(|| {
                totals.push((genre, 0.0, 0));
                totals.len() - 1
            });
            totals[idx].1 += rating;
            totals[idx].2 += 1;
        }
    }

    GenreAverages {
        entries: totals
            .into_iter()
            .map(|(genre, sum, count)| (genre.to_string(), sum / count as f64))
            .collect(),
    }
}

/// Every genre named anywhere in the current listing.
pub fn genre_universe<C: Catalog + ?Sized>(catalog: &C) -> Result<GenreSet> {
    let genres = collect_genres(&catalog.list_all()?);
    info!("found {} genres", genres.len());
    Ok(genres)
}

pub fn rated_subset<C: Catalog + ?Sized>(catalog: &C) -> Result<Vec<RawShow>> {
    let rated = retain_rated(catalog.list_all()?);
    info!("{} rated shows", rated.len());
    Ok(rated)
}

pub fn ranked_list<C: Catalog + ?Sized>(
    catalog: &C,
    order: Order,
    genre: Option<&str>,
) -> Result<Vec<RankedEntry>> {
    Ok(rank(rated_subset(catalog)?, order, genre))
}

pub fn genre_averages<C: Catalog + ?Sized>(catalog: &C) -> Result<GenreAverages> {
    Ok(average_by_genre(&rated_subset(catalog)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing() -> Vec<RawShow> {
        [
            json!({"name": "A", "genres": ["Drama", "Crime"], "rating": {"average": 8.0}}),
            json!({"name": "B", "genres": ["Comedy"], "rating": {"average": 6.5}}),
            json!({"name": "C", "genres": ["Drama"], "rating": null}),
            json!({"name": "D", "genres": ["Crime"], "rating": {"average": 8.0}}),
            json!({"name": "E", "genres": [], "rating": {"average": 9.1}}),
            json!({"name": "F", "genres": ["Drama"], "rating": {"average": null}}),
            json!({"name": "G", "genres": ["drama", "Horror"]}),
            json!({"name": "H", "genres": ["Drama"], "rating": {"average": 4.0}}),
        ]
        .into_iter()
        .map(RawShow)
        .collect()
    }

    fn names(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn order_tokens() {
        assert_eq!("asc".parse::<Order>(), Ok(Order::Asc));
        assert_eq!(" DESC ".parse::<Order>(), Ok(Order::Desc));
        assert_eq!("up".parse::<Order>(), Err(()));
    }

    #[test]
    fn genres_union() {
        let genres = collect_genres(&listing());
        let expected: GenreSet = ["Comedy", "Crime", "Drama", "Horror", "drama"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(genres, expected);
    }

    #[test]
    fn only_rated_kept() {
        let rated = retain_rated(listing());
        let rated: Vec<_> = rated.iter().map(|s| s.name()).collect();
        assert_eq!(rated, vec!["A", "B", "D", "E", "H"]);
    }

    #[test]
    fn rank_ascending_is_stable() {
        let ranked = rank(retain_rated(listing()), Order::Asc, None);
        assert_eq!(names(&ranked), vec!["H", "B", "A", "D", "E"]);
        assert!(ranked.windows(2).all(|w| w[0].rating <= w[1].rating));
    }

    #[test]
    fn rank_descending_is_stable() {
        let ranked = rank(retain_rated(listing()), Order::Desc, None);
        assert_eq!(names(&ranked), vec!["E", "A", "D", "B", "H"]);
        assert!(ranked.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn rank_filters_by_genre_ignoring_case() {
        let rated = retain_rated(listing());
        let total = rated.len();
        let ranked = rank(rated, Order::Desc, Some("dRAMA"));
        assert_eq!(names(&ranked), vec!["A", "H"]);
        assert!(ranked.len() <= total);

        let ranked = rank(retain_rated(listing()), Order::Asc, Some("Western"));
        assert!(ranked.is_empty());
    }

    #[test]
    fn averages_per_genre() {
        let averages = average_by_genre(&retain_rated(listing()));
        let pairs: Vec<_> = averages.iter().collect();
        assert_eq!(pairs, vec![("Drama", 6.0), ("Crime", 8.0), ("Comedy", 6.5)]);
    }

    #[test]
    fn multi_genre_show_counts_once_per_genre() {
        let shows = vec![RawShow(
            json!({"name": "X", "genres": ["A", "B", "C"], "rating": {"average": 5.0}}),
        )];
        let averages = average_by_genre(&shows);
        assert_eq!(averages.len(), 3);
        assert!(averages.iter().all(|(_, avg)| avg == 5.0));
    }

    #[test]
    fn empty_listing() {
        assert!(average_by_genre(&[]).is_empty());
        assert!(collect_genres(&[]).is_empty());
        assert!(rank(Vec::new(), Order::Asc, None).is_empty());
    }
}
