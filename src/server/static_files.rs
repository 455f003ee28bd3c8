//! Embedded front end. A thin display shell over the JSON API.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="hu">
<head>
<meta charset="utf-8">
<title>School Tripper</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 960px; }
  form { display: flex; gap: .5rem; margin-bottom: 1rem; }
  .card { border: 1px solid #ddd; border-radius: 8px; padding: .75rem; margin: .5rem 0; }
  .card img { max-width: 200px; display: block; }
  .muted { color: #777; }
  ol { margin: .25rem 0; }
</style>
</head>
<body>
<h1>School Tripper</h1>
<form id="trip">
  <input id="country" placeholder="Ország" required>
  <input id="city" placeholder="Város" required>
  <input id="date" type="date">
  <button>Keresés</button>
</form>
<p id="status" class="muted"></p>
<div id="hostels"></div>
<script src="/app.js"></script>
</body>
</html>
"#;

pub const APP_JS: &str = r#"const $ = (id) => document.getElementById(id);

async function post(path, value) {
  const res = await fetch(path, {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ value }),
  });
  return res.json();
}

async function get(path) {
  return (await fetch(path)).json();
}

function el(tag, text, cls) {
  const e = document.createElement(tag);
  if (text !== undefined) e.textContent = text;
  if (cls) e.className = cls;
  return e;
}

async function showMenu(target, hostel, restaurant) {
  const items = await get(`/api/hostels/${hostel}/restaurants/${restaurant}/menu`);
  const list = el("ol");
  for (const item of items) list.appendChild(el("li", item.price ? `${item.name} — ${item.price}` : item.name));
  target.replaceChildren(list);
}

async function showRestaurants(target, hostel) {
  target.replaceChildren(el("p", "…", "muted"));
  const restaurants = await get(`/api/hostels/${hostel}/restaurants`);
  target.replaceChildren();
  restaurants.forEach((r, i) => {
    const card = el("div", undefined, "card");
    card.appendChild(el("strong", r.name));
    card.appendChild(el("span", ` ★ ${r.rating}`, "muted"));
    if (r.photo_url) { const img = el("img"); img.src = r.photo_url; card.appendChild(img); }
    const menu = el("div");
    const btn = el("button", "Menü");
    btn.onclick = () => showMenu(menu, hostel, i);
    card.append(btn, menu);
    target.appendChild(card);
  });
}

$("trip").addEventListener("submit", async (ev) => {
  ev.preventDefault();
  $("status").textContent = "Keresés…";
  const { country } = await post("/api/country", $("country").value);
  const { city } = await post("/api/city", $("city").value);
  if ($("date").value) await post("/api/date", $("date").value);
  $("status").textContent = country && city ? `${city}, ${country}` : "Nem található hely.";

  const info = await get("/api/hostels");
  const root = $("hostels");
  root.replaceChildren();
  info.names.forEach((name, i) => {
    const card = el("div", undefined, "card");
    card.appendChild(el("h3", name));
    card.appendChild(el("p", `★ ${info.ratings[i]} · ${info.prices[i]}`, "muted"));
    if (info.photo_urls[i]) { const img = el("img"); img.src = info.photo_urls[i]; card.appendChild(img); }
    const list = el("div");
    const btn = el("button", "Éttermek");
    btn.onclick = () => showRestaurants(list, i);
    card.append(btn, list);
    root.appendChild(card);
  });
});
"#;
