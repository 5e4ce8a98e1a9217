//! Process-wide cache of lookup tables, one per (enum type, string type) pair.
//!
//! Tables are built at most once, inside the write lock, and leaked to
//! `'static`; afterwards every query is a read-only hit. The canonical
//! (`&'static str`) table is built straight from the association list, any
//! other string type re-projects from it.

use {
	crate::{table::LookupTable, EnumString, ReflectedEnum},
	once_cell::sync::Lazy,
	std::{
		any::{Any, TypeId},
		collections::HashMap,
		sync::{PoisonError, RwLock},
	},
};

type TableRef = &'static (dyn Any + Send + Sync);

static TABLES: Lazy<RwLock<HashMap<TypeId, TableRef>>> = Lazy::new(|| RwLock::new(HashMap::new()));

pub(crate) fn canonical<E: ReflectedEnum>() -> &'static LookupTable<E, &'static str> {
	table::<E, &'static str>()
}

pub(crate) fn table<E: ReflectedEnum, S: EnumString>() -> &'static LookupTable<E, S> {
	let key = TypeId::of::<(E, S)>();

	{
		let tables = TABLES.read().unwrap_or_else(PoisonError::into_inner);
		if let Some(&existing) = tables.get(&key) {
			return downcast::<E, S>(existing);
		}
	}

	// Re-projection reads the canonical table, so resolve it before taking
	// the write lock; otherwise the recursive call would deadlock.
	let source = if TypeId::of::<S>() == TypeId::of::<&'static str>() {
		None
	} else {
		Some(canonical::<E>())
	};

	let mut tables = TABLES.write().unwrap_or_else(PoisonError::into_inner);
	let entry = tables.entry(key).or_insert_with(|| {
		let built = match source {
			Some(canonical_table) => LookupTable::<E, S>::reproject(canonical_table),
			None => LookupTable::<E, S>::build(E::ASSOCIATIONS),
		};
		let leaked: TableRef = Box::leak(Box::new(built));
		leaked
	});
	downcast::<E, S>(*entry)
}

fn downcast<E: ReflectedEnum, S: EnumString>(any: TableRef) -> &'static LookupTable<E, S> {
	match any.downcast_ref::<LookupTable<E, S>>() {
		Some(table) => table,
		None => unreachable!("lookup table registered under a mismatched type"),
	}
}
