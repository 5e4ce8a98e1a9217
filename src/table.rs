//! The two lookup-table representations behind every registered enum.
//!
//! A [`LookupTable`] is selected once per enum type from `E::ORDINAL`: the
//! dense form indexes names directly by the raw value, the sparse form keeps
//! two binary-searchable sorted copies of the association list. Both are
//! immutable after construction.

use {
	crate::{EnumString, ReflectedEnum},
	num_traits::ToPrimitive,
};

/// Direct-indexed representation, valid only when the raw values are exactly
/// `0..COUNT` in declaration order.
pub(crate) struct DenseTable<E, S> {
	name_by_ordinal: Box<[S]>,
	sorted_names: Box<[(S, E)]>,
}

impl<E: ReflectedEnum, S: EnumString> DenseTable<E, S> {
	fn build(associations: &'static [(E, &'static str)]) -> Self {
		// Ordinality guarantees declaration order equals ordinal order.
		debug_assert!(associations
			.iter()
			.enumerate()
			.all(|(index, (value, _))| value.to_repr().to_usize() == Some(index)));

		let name_by_ordinal = associations
			.iter()
			.map(|(_, name)| S::from_name(name))
			.collect::<Box<[S]>>();

		let mut sorted_names = associations
			.iter()
			.map(|(value, name)| (S::from_name(name), *value))
			.collect::<Vec<_>>();
		sorted_names.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));

		DenseTable {
			name_by_ordinal,
			sorted_names: sorted_names.into_boxed_slice(),
		}
	}

	fn reproject(canonical: &DenseTable<E, &'static str>) -> Self {
		let name_by_ordinal = canonical
			.name_by_ordinal
			.iter()
			.map(|name| S::from_name(name))
			.collect::<Box<[S]>>();

		// The adapter's ordering need not match the canonical one.
		let mut sorted_names = canonical
			.sorted_names
			.iter()
			.map(|(name, value)| (S::from_name(name), *value))
			.collect::<Vec<_>>();
		sorted_names.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));

		DenseTable {
			name_by_ordinal,
			sorted_names: sorted_names.into_boxed_slice(),
		}
	}

	fn to_string(&self, value: E) -> &S {
		match value.to_repr().to_usize() {
			Some(ordinal) if ordinal < self.name_by_ordinal.len() => &self.name_by_ordinal[ordinal],
			_ => unreachable!("value outside the ordinal range of a registered enum"),
		}
	}

	fn is_valid(&self, repr: E::Repr) -> bool {
		match repr.to_usize() {
			Some(ordinal) => ordinal < self.name_by_ordinal.len(),
			None => false,
		}
	}
}

/// General representation for non-contiguous or non-zero-based enums,
/// including negative raw values.
pub(crate) struct SparseTable<E, S> {
	by_value: Box<[(E, S)]>,
	by_name: Box<[(S, E)]>,
}

impl<E: ReflectedEnum, S: EnumString> SparseTable<E, S> {
	fn build(associations: &'static [(E, &'static str)]) -> Self {
		let mut by_value = associations
			.iter()
			.map(|(value, name)| (*value, S::from_name(name)))
			.collect::<Vec<_>>();
		by_value.sort_by(|lhs, rhs| lhs.0.to_repr().cmp(&rhs.0.to_repr()));

		let mut by_name = associations
			.iter()
			.map(|(value, name)| (S::from_name(name), *value))
			.collect::<Vec<_>>();
		by_name.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));

		SparseTable {
			by_value: by_value.into_boxed_slice(),
			by_name: by_name.into_boxed_slice(),
		}
	}

	fn reproject(canonical: &SparseTable<E, &'static str>) -> Self {
		// Value order is independent of the string type, so `by_value` keeps
		// its order; `by_name` is re-sorted under the adapter's ordering.
		let by_value = canonical
			.by_value
			.iter()
			.map(|(value, name)| (*value, S::from_name(name)))
			.collect::<Box<[(E, S)]>>();

		let mut by_name = canonical
			.by_name
			.iter()
			.map(|(name, value)| (S::from_name(name), *value))
			.collect::<Vec<_>>();
		by_name.sort_by(|lhs, rhs| lhs.0.cmp(&rhs.0));

		SparseTable {
			by_value,
			by_name: by_name.into_boxed_slice(),
		}
	}

	fn to_string(&self, value: E) -> &S {
		let repr = value.to_repr();
		match self
			.by_value
			.binary_search_by(|(candidate, _)| candidate.to_repr().cmp(&repr))
		{
			Ok(index) => &self.by_value[index].1,
			// Every enumerator the type declares is in the table; reaching
			// this means the table construction itself is broken.
			Err(_) => unreachable!("enum value {:?} missing from its lookup table", repr),
		}
	}

	fn is_valid(&self, repr: E::Repr) -> bool {
		self.by_value
			.binary_search_by(|(candidate, _)| candidate.to_repr().cmp(&repr))
			.is_ok()
	}

	fn from_repr(&self, repr: E::Repr) -> Option<E> {
		match self
			.by_value
			.binary_search_by(|(candidate, _)| candidate.to_repr().cmp(&repr))
		{
			Ok(index) => Some(self.by_value[index].0),
			Err(_) => None,
		}
	}
}

/// A registered enum's lookup table, in whichever representation the
/// ordinality detector selected.
///
/// Two members sharing a raw value would make value lookups land on an
/// unspecified but deterministic entry; Rust rejects duplicate discriminants
/// (E0081), so neither registration path can produce that case.
pub(crate) enum LookupTable<E, S> {
	Dense(DenseTable<E, S>),
	Sparse(SparseTable<E, S>),
}

impl<E: ReflectedEnum, S: EnumString> LookupTable<E, S> {
	pub(crate) fn build(associations: &'static [(E, &'static str)]) -> Self {
		if E::ORDINAL {
			LookupTable::Dense(DenseTable::build(associations))
		} else {
			LookupTable::Sparse(SparseTable::build(associations))
		}
	}

	/// Re-projects an existing canonical table into the string type `S`,
	/// without re-deriving the association list.
	pub(crate) fn reproject(canonical: &LookupTable<E, &'static str>) -> Self {
		match canonical {
			LookupTable::Dense(table) => LookupTable::Dense(DenseTable::reproject(table)),
			LookupTable::Sparse(table) => LookupTable::Sparse(SparseTable::reproject(table)),
		}
	}

	pub(crate) fn to_string(&self, value: E) -> &S {
		match self {
			LookupTable::Dense(table) => table.to_string(value),
			LookupTable::Sparse(table) => table.to_string(value),
		}
	}

	pub(crate) fn to_enum(&self, name: &S) -> Option<E> {
		let entries = match self {
			LookupTable::Dense(table) => &table.sorted_names,
			LookupTable::Sparse(table) => &table.by_name,
		};
		match entries.binary_search_by(|entry| entry.0.cmp(name)) {
			Ok(index) => Some(entries[index].1),
			Err(_) => None,
		}
	}

	pub(crate) fn is_valid(&self, repr: E::Repr) -> bool {
		match self {
			LookupTable::Dense(table) => table.is_valid(repr),
			LookupTable::Sparse(table) => table.is_valid(repr),
		}
	}

	pub(crate) fn from_repr(&self, repr: E::Repr) -> Option<E> {
		match self {
			LookupTable::Dense(_) => match repr.to_usize() {
				Some(ordinal) if ordinal < E::COUNT => Some(E::ASSOCIATIONS[ordinal].0),
				_ => None,
			},
			LookupTable::Sparse(table) => table.from_repr(repr),
		}
	}

	fn value_at(&self, index: usize) -> E {
		match self {
			LookupTable::Dense(_) => E::ASSOCIATIONS[index].0,
			LookupTable::Sparse(table) => table.by_value[index].0,
		}
	}

	fn name_at(&self, index: usize) -> &S {
		match self {
			LookupTable::Dense(table) => &table.name_by_ordinal[index],
			LookupTable::Sparse(table) => &table.by_value[index].1,
		}
	}
}

impl<E: ReflectedEnum> LookupTable<E, &'static str> {
	/// Name lookup keyed on an arbitrary-lifetime `&str`, for the canonical
	/// table only.
	pub(crate) fn to_enum_str(&self, name: &str) -> Option<E> {
		let entries = match self {
			LookupTable::Dense(table) => &table.sorted_names,
			LookupTable::Sparse(table) => &table.by_name,
		};
		match entries.binary_search_by(|entry| <str as Ord>::cmp(entry.0, name)) {
			Ok(index) => Some(entries[index].1),
			Err(_) => None,
		}
	}
}

/// Iterator over every member of a registered enum.
///
/// Dense tables yield declaration (= ordinal) order; sparse tables yield
/// ascending-raw-value order. Positionally aligned with [`AllStrings`].
#[derive(Clone)]
pub struct AllValues<E: ReflectedEnum> {
	table: &'static LookupTable<E, &'static str>,
	index: usize,
}

impl<E: ReflectedEnum> AllValues<E> {
	pub(crate) fn new(table: &'static LookupTable<E, &'static str>) -> Self {
		AllValues { table, index: 0 }
	}
}

impl<E: ReflectedEnum> Iterator for AllValues<E> {
	type Item = E;

	fn next(&mut self) -> Option<E> {
		if self.index >= E::COUNT {
			return None;
		}
		let value = self.table.value_at(self.index);
		self.index += 1;
		Some(value)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = E::COUNT - self.index;
		(remaining, Some(remaining))
	}
}

impl<E: ReflectedEnum> ExactSizeIterator for AllValues<E> {}

/// Iterator over every member's name, in the same order as [`AllValues`].
#[derive(Clone)]
pub struct AllStrings<E: ReflectedEnum, S: EnumString> {
	table: &'static LookupTable<E, S>,
	index: usize,
}

impl<E: ReflectedEnum, S: EnumString> AllStrings<E, S> {
	pub(crate) fn new(table: &'static LookupTable<E, S>) -> Self {
		AllStrings { table, index: 0 }
	}
}

impl<E: ReflectedEnum, S: EnumString> Iterator for AllStrings<E, S> {
	type Item = &'static S;

	fn next(&mut self) -> Option<&'static S> {
		if self.index >= E::COUNT {
			return None;
		}
		let name = self.table.name_at(self.index);
		self.index += 1;
		Some(name)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = E::COUNT - self.index;
		(remaining, Some(remaining))
	}
}

impl<E: ReflectedEnum, S: EnumString> ExactSizeIterator for AllStrings<E, S> {}

#[cfg(test)]
mod tests {
	use {
		super::LookupTable,
		crate::{is_ordinal_values, ReflectedEnum},
	};

	#[derive(Clone, Copy, PartialEq, Eq, Debug)]
	#[repr(u8)]
	enum Direction {
		North,
		East,
		South,
		West,
	}

	crate::register_enum!(Direction : u8 { North, East, South, West });

	#[derive(Clone, Copy, PartialEq, Eq, Debug)]
	#[repr(i16)]
	enum Offset {
		Plus = 9,
		Minus = -5,
		Zero = 0,
	}

	crate::register_enum!(Offset : i16 { Plus, Minus, Zero });

	#[test]
	fn detector() {
		assert!(is_ordinal_values(&[]));
		assert!(is_ordinal_values(&[0]));
		assert!(is_ordinal_values(&[0, 1, 2]));
		assert!(!is_ordinal_values(&[1, 2, 3]));
		assert!(!is_ordinal_values(&[0, 2, 1]));
		assert!(!is_ordinal_values(&[0, 1, 2, 2]));
		assert!(!is_ordinal_values(&[-1, 0, 1]));
	}

	#[test]
	fn dense_table() {
		assert!(Direction::ORDINAL);
		let table = LookupTable::<Direction, &'static str>::build(Direction::ASSOCIATIONS);

		assert_eq!(*table.to_string(Direction::North), "North");
		assert_eq!(*table.to_string(Direction::West), "West");
		assert_eq!(table.to_enum_str("South"), Some(Direction::South));
		assert_eq!(table.to_enum_str("Northwest"), None);
		assert!(table.is_valid(3));
		assert!(!table.is_valid(4));
		assert_eq!(table.from_repr(1), Some(Direction::East));
		assert_eq!(table.from_repr(200), None);
	}

	#[test]
	fn sparse_table() {
		assert!(!Offset::ORDINAL);
		let table = LookupTable::<Offset, &'static str>::build(Offset::ASSOCIATIONS);

		assert_eq!(*table.to_string(Offset::Minus), "Minus");
		assert_eq!(table.to_enum_str("Zero"), Some(Offset::Zero));
		assert_eq!(table.to_enum_str(""), None);
		assert!(table.is_valid(-5));
		assert!(!table.is_valid(1));
		assert_eq!(table.from_repr(9), Some(Offset::Plus));
		assert_eq!(table.from_repr(-4), None);
	}

	#[test]
	fn sparse_iteration_is_value_sorted() {
		let table = LookupTable::<Offset, &'static str>::build(Offset::ASSOCIATIONS);
		let values = (0..Offset::COUNT).map(|i| table.value_at(i)).collect::<Vec<_>>();
		let names = (0..Offset::COUNT).map(|i| *table.name_at(i)).collect::<Vec<_>>();
		assert_eq!(values, [Offset::Minus, Offset::Zero, Offset::Plus]);
		assert_eq!(names, ["Minus", "Zero", "Plus"]);
	}

	#[test]
	fn reprojection_resorts_names() {
		let canonical = LookupTable::<Direction, &'static str>::build(Direction::ASSOCIATIONS);
		let projected = LookupTable::<Direction, String>::reproject(&canonical);

		assert_eq!(projected.to_string(Direction::East), "East");
		assert_eq!(projected.to_enum(&"West".to_owned()), Some(Direction::West));
		assert_eq!(projected.to_enum(&"west".to_owned()), None);
	}
}
