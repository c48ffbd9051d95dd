use serde_json::{Map, Number, Value};
use sqlx::{
    query::Query,
    sqlite::{SqliteArguments, SqliteRow},
    Column, Row, Sqlite, TypeInfo, ValueRef,
};

use crate::model::db::Error;

pub const ROW_LIMIT: usize = 100;

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Wraps a table or column name in double quotes, doubling embedded quotes.
pub fn quote_ident(name: &str) -> Result<String, Error> {
    if name.is_empty() {
        return Err(Error::EmptyName());
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

pub fn select_sql(table: &str) -> Result<String, Error> {
    Ok(format!("SELECT * FROM {} LIMIT {}", quote_ident(table)?, ROW_LIMIT))
}

pub fn insert_sql(table: &str, data: &Map<String, Value>) -> Result<String, Error> {
    let table = quote_ident(table)?;
    if data.is_empty() {
        return Ok(format!("INSERT INTO {} DEFAULT VALUES", table));
    }
    let columns = data
        .keys()
        .map(|k| quote_ident(k))
        .collect::<Result<Vec<_>, _>>()?
        .join(",");
    let placeholders = vec!["?"; data.len()].join(",");
    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table, columns, placeholders
    ))
}

pub fn update_sql(table: &str, data: &Map<String, Value>) -> Result<String, Error> {
    let table = quote_ident(table)?;
    if data.is_empty() {
        return Err(Error::NoColumns());
    }
    let updates = data
        .keys()
        .map(|k| quote_ident(k).map(|c| format!("{} = ?", c)))
        .collect::<Result<Vec<_>, _>>()?
        .join(",");
    Ok(format!("UPDATE {} SET {} WHERE id = ?", table, updates))
}

pub fn delete_sql(table: &str) -> Result<String, Error> {
    Ok(format!("DELETE FROM {} WHERE id = ?", quote_ident(table)?))
}

pub fn clear_sql(table: &str) -> Result<String, Error> {
    Ok(format!("DELETE FROM {}", quote_ident(table)?))
}

pub fn bind_value<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64()),
        },
        Value::String(s) => query.bind(s.clone()),
        other => query.bind(other.to_string()),
    }
}

/// Row ids come from the url, bind them as integers when they look like one.
pub fn bind_id<'q>(query: SqliteQuery<'q>, id: &str) -> SqliteQuery<'q> {
    match id.parse::<i64>() {
        Ok(i) => query.bind(i),
        Err(_) => query.bind(id.to_string()),
    }
}

pub fn row_to_json(row: &SqliteRow) -> Result<Map<String, Value>, sqlx::Error> {
    let mut res = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(i)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(i)?),
                "REAL" => Number::from_f64(row.try_get::<f64, _>(i)?)
                    .map_or(Value::Null, Value::Number),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(i)?),
                _ => Value::from(row.try_get::<String, _>(i)?),
            }
        };
        res.insert(column.name().to_string(), value);
    }
    Ok(res)
}
